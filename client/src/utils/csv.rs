//! Minimal CSV writer (RFC 4180 quoting) for exports.

use std::io::Write;

use crate::core::error::Result;

/// Quote a field if it contains a separator, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write one record terminated by CRLF.
pub fn write_record<W, I, S>(writer: &mut W, fields: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Budi"), "Budi");
        assert_eq!(escape_field("Blok A, No. 3"), "\"Blok A, No. 3\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_write_record() {
        let mut out = Vec::new();
        write_record(&mut out, ["id", "nama, lengkap"]).unwrap();
        write_record(&mut out, vec![String::from("p1"), String::new()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,\"nama, lengkap\"\r\np1,\r\n");
    }
}
