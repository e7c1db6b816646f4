use crate::Result;
use crate::facts::Collection;
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(collection: &Collection, writer: &mut W) -> Result<()> {
    let omissions: Vec<_> = collection
        .omissions
        .iter()
        .map(|o| {
            json!({
                "position": o.position,
                "repository": o.repository,
                "reason": o.reason.to_string(),
            })
        })
        .collect();

    let output = json!({
        "since": collection.since.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "repositories": collection.repositories,
        "omissions": omissions,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
