// view command: remote archives grouped by base name
use crate::catalog;
use crate::error::Result;
use crate::remote::Remote;

pub fn execute(remote: &dyn Remote) -> Result<()> {
    // Grouping needs the full set before printing; the stream still avoids
    // buffering the raw tool output.
    let names = remote.list_archives()?.collect::<Result<Vec<_>>>()?;
    let families = catalog::group(names);
    print!("{}", catalog::render(&families));
    Ok(())
}
