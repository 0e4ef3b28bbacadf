//! CSV export of session tables, for taking a filtered view back into a
//! spreadsheet.

use std::io::Write;

use crate::session::Session;

/// Write the rows as CSV. Headers come from the session's serde field names,
/// so the columns match the upstream sheet's Arabic headers.
pub fn write_sessions_csv<W: Write>(writer: W, sessions: &[&Session]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for session in sessions {
        out.serialize(session)?;
    }
    out.flush()?;
    Ok(())
}
