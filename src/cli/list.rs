// list command: flat, optionally filtered listing
use crate::error::Result;
use crate::remote::Remote;

pub fn execute(remote: &dyn Remote, substring: Option<&str>) -> Result<()> {
    let names = remote.list_archives()?.collect::<Result<Vec<_>>>()?;
    for name in matching(names, substring) {
        println!("{}", name);
    }
    Ok(())
}

/// Sorted names containing `substring`, or all of them when no filter is
/// given.
pub(crate) fn matching(mut names: Vec<String>, substring: Option<&str>) -> Vec<String> {
    names.retain(|name| substring.map_or(true, |needle| name.contains(needle)));
    names.sort();
    names
}
