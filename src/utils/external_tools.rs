use crate::error::{ConvertError, Result};
use std::process::Command;

pub fn check_samtools(program: &str) -> Result<()> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|source| ConvertError::SinkOpen {
            message: format!(
                "{} not found. Please install samtools (http://www.htslib.org/) and ensure it's in your PATH",
                program
            ),
            source: Some(source),
        })?;

    if !output.status.success() {
        return Err(ConvertError::SinkOpen {
            message: format!("{} --version exited with {}", program, output.status),
            source: None,
        });
    }
    Ok(())
}
