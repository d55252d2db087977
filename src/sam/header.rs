use crate::error::{ConvertError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Built-in header written when no override file is configured.
pub const DEFAULT_HEADER: [&str; 3] = [
    "@HD\tVN:1.5\tSO:unknown\tpb:3.0.1\n",
    concat!(
        "@RG\tID:4f25f78c\tPL:PACBIO\t",
        "DS:READTYPE=CCS;BINDINGKIT=101-820-500;SEQUENCINGKIT=101-826-100;",
        "BASECALLERVERSION=5.0.0;FRAMERATEHZ=100.000000\tLB:SQlle ",
        "zeBAM\tPU:m64187e_211217_130958\t",
        "PM:SEQUELII\tCM:S/P4.1-C2/5.0-8M\n",
    ),
    concat!(
        "@PG\tID:ccs-6.0.0\tPN:ccs\tVN:6.0.0\tDS:Generate circular ",
        "consensus sequences (ccs) from subreads.\tCL:ccs ...\n",
    ),
];

/// The single header block that precedes all alignment lines.
pub enum SamHeader {
    Default,
    /// Opened eagerly so an unreadable file fails before the sink is touched.
    File {
        path: PathBuf,
        reader: BufReader<File>,
    },
}

impl SamHeader {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(SamHeader::Default),
            Some(path) => {
                let file = File::open(path).map_err(|source| ConvertError::HeaderFile {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(SamHeader::File {
                    path: path.to_path_buf(),
                    reader: BufReader::new(file),
                })
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SamHeader::Default => "built-in default".to_string(),
            SamHeader::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes the header. Override files are copied line by line, byte for byte.
    pub fn write_to<W: Write + ?Sized>(self, out: &mut W) -> Result<()> {
        match self {
            SamHeader::Default => {
                for line in DEFAULT_HEADER {
                    out.write_all(line.as_bytes()).map_err(ConvertError::SinkWrite)?;
                }
            }
            SamHeader::File { path, mut reader } => {
                let mut line = Vec::new();
                loop {
                    line.clear();
                    let n = reader
                        .read_until(b'\n', &mut line)
                        .map_err(|source| ConvertError::HeaderFile {
                            path: path.clone(),
                            source,
                        })?;
                    if n == 0 {
                        break;
                    }
                    out.write_all(&line).map_err(ConvertError::SinkWrite)?;
                }
            }
        }
        Ok(())
    }
}
