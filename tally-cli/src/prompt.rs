use anyhow::{Result, bail};
use std::io::{self, BufRead, Write};

pub fn prompt(label: &str) -> Result<String> {
    let stdin = io::stdin();
    prompt_from(label, &mut stdin.lock(), &mut io::stdout())
}

pub fn prompt_from<R: BufRead, W: Write>(label: &str, input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "{}: ", label)?;
    out.flush().ok();
    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        bail!("no input for \"{}\"", label);
    }
    Ok(s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_trims_answer() {
        let mut input = io::Cursor::new("  /tmp/jan.pdf \n");
        let mut out = Vec::new();
        let answer = prompt_from("Path", &mut input, &mut out).unwrap();
        assert_eq!(answer, "/tmp/jan.pdf");
        assert_eq!(String::from_utf8(out).unwrap(), "Path: ");
    }

    #[test]
    fn test_prompt_eof_is_an_error() {
        let mut input = io::Cursor::new("");
        let mut out = Vec::new();
        assert!(prompt_from("Password", &mut input, &mut out).is_err());
    }
}
