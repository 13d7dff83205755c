use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Parser)]
#[command(name = "export")]
#[command(about = "Save a plain-text recipe file as PDF")]
pub struct App {
    /// Text file to convert ("-" reads standard input)
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = pdf::DOWNLOAD_FILE_NAME)]
    output: PathBuf,

    /// Read the written PDF back and print its text rows
    #[arg(long)]
    check: bool,
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(text);
    }

    std::fs::read_to_string(input).with_context(|| f!("Failed to read {}", input.display()))
}

/// Convert `text` to PDF and write it to `output`. Returns the PDF bytes.
pub fn write_pdf(text: &str, output: &Path) -> Result<Vec<u8>> {
    let bytes = pdf::export(text).map_err(|e| eyre!(Error::Export(e.to_string())))?;
    std::fs::write(output, &bytes).with_context(|| f!("Failed to write {}", output.display()))?;
    Ok(bytes)
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let text = read_input(&app.input)?;
    let bytes = write_pdf(&text, &app.output)?;

    if global.verbose {
        eprintln!(
            "{} bytes, {} page(s)",
            bytes.len(),
            pdf::page_count(&bytes).map_err(|e| eyre!("{e}"))?
        );
    }
    eprintln!("{} {}", "Saved".green(), app.output.display());

    if app.check {
        let rows = pdf::read_lines(&bytes).map_err(|e| eyre!("Failed to read back PDF: {e}"))?;
        for row in rows {
            println!("{row}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_pdf_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(pdf::DOWNLOAD_FILE_NAME);

        let bytes = write_pdf("Recipe 1: Paneer Tikka\nServes 2", &output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), bytes);
        assert_eq!(
            pdf::read_lines(&bytes).unwrap(),
            vec!["Recipe 1: Paneer Tikka", "Serves 2"]
        );
    }

    #[test]
    fn test_unencodable_text_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("hindi.pdf");

        let err = write_pdf("दाल", &output).unwrap_err();
        assert!(err.to_string().starts_with("Could not create the PDF"));
        assert!(!output.exists());
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("recipes.txt");
        std::fs::write(&input, "Step 1").unwrap();

        assert_eq!(read_input(&input).unwrap(), "Step 1");
        assert!(read_input(&dir.path().join("missing.txt")).is_err());
    }
}
