//! Replay logs: record a game's inputs as JSON lines and play them back.
//!
//! ```text
//! {"seed":7,"width":10,"height":20,"rotation":"fixed"}
//! {"kind":"tick"}
//! {"kind":"command","command":"left"}
//! {"kind":"start"}
//! ```
//!
//! Sessions are deterministic given the seed and the input order, so a log
//! reproduces the final board exactly.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::check_dimensions;
use crate::core::{Session, SessionConfig, SessionSnapshot};
use crate::types::{Command, RotationMode};

/// First line of a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayHeader {
    pub seed: u32,
    pub width: u16,
    pub height: u16,
    #[serde(with = "rotation_name")]
    pub rotation: RotationMode,
}

impl From<SessionConfig> for ReplayHeader {
    fn from(config: SessionConfig) -> Self {
        Self {
            seed: config.seed,
            width: config.width,
            height: config.height,
            rotation: config.rotation,
        }
    }
}

impl ReplayHeader {
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            rotation: self.rotation,
        }
    }
}

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReplayEntry {
    /// A restart (`Session::start`) after the initial one
    Start,
    Tick,
    /// Kept as text so logs with unknown commands still load
    Command { command: String },
}

impl ReplayEntry {
    pub fn command(command: Command) -> Self {
        Self::Command {
            command: command.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayLog {
    pub header: ReplayHeader,
    pub entries: Vec<ReplayEntry>,
}

impl ReplayLog {
    pub fn new(header: ReplayHeader) -> Self {
        Self {
            header,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ReplayEntry) {
        self.entries.push(entry);
    }

    /// Parse JSON lines. Blank lines are skipped.
    pub fn read_from(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()));

        let (_, first) = lines.next().ok_or_else(|| anyhow!("replay: empty log"))?;
        let header: ReplayHeader =
            serde_json::from_str(&first?).context("replay: invalid header line")?;
        check_dimensions(header.width, header.height).context("replay: invalid header line")?;

        let mut log = Self::new(header);
        for (n, line) in lines {
            let entry = serde_json::from_str(&line?)
                .with_context(|| format!("replay: invalid entry on line {}", n + 1))?;
            log.push(entry);
        }
        Ok(log)
    }

    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        write_line(&mut writer, &self.header)?;
        for entry in &self.entries {
            write_line(&mut writer, entry)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("replay: cannot open {}", path.display()))?;
        Self::read_from(BufReader::new(file))
    }
}

fn write_line<T: Serialize>(writer: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Streams entries to a log file while a game runs.
pub struct Recorder<W: Write = BufWriter<File>> {
    out: W,
    entries: u64,
}

impl Recorder<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, header: ReplayHeader) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("replay: cannot create {}", path.display()))?;
        Self::new(BufWriter::new(file), header)
    }
}

impl<W: Write> Recorder<W> {
    /// Write the header and return a recorder for the entries.
    pub fn new(mut out: W, header: ReplayHeader) -> Result<Self> {
        write_line(&mut out, &header)?;
        Ok(Self { out, entries: 0 })
    }

    pub fn record(&mut self, entry: &ReplayEntry) -> Result<()> {
        write_line(&mut self.out, entry)?;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Run a log against a fresh manually ticked session.
///
/// The session is started before the first entry. Unknown command strings
/// are skipped.
pub fn replay(log: &ReplayLog) -> SessionSnapshot {
    replay_session(log).snapshot()
}

/// Like [`replay`] but hands back the session itself.
pub fn replay_session(log: &ReplayLog) -> Session {
    let mut session = Session::manual(log.header.session());
    session.start();

    for entry in &log.entries {
        match entry {
            ReplayEntry::Start => session.start(),
            ReplayEntry::Tick => {
                session.on_tick();
            }
            ReplayEntry::Command { command } => {
                session.on_input(command);
            }
        }
    }
    session
}

mod rotation_name {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::types::RotationMode;

    pub fn serialize<S: Serializer>(mode: &RotationMode, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<RotationMode, D::Error> {
        let name = String::deserialize(d)?;
        RotationMode::from_str(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown rotation mode: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> ReplayHeader {
        ReplayHeader::from(SessionConfig::default())
    }

    #[test]
    fn test_entry_json_shape() {
        assert_eq!(
            serde_json::to_string(&ReplayEntry::Tick).unwrap(),
            r#"{"kind":"tick"}"#
        );
        assert_eq!(
            serde_json::to_string(&ReplayEntry::command(Command::Left)).unwrap(),
            r#"{"kind":"command","command":"left"}"#
        );
        assert_eq!(
            serde_json::to_string(&header()).unwrap(),
            r#"{"seed":1,"width":10,"height":20,"rotation":"fixed"}"#
        );
    }

    #[test]
    fn test_read_log() {
        let text = "{\"seed\":3,\"width\":8,\"height\":6,\"rotation\":\"geometric\"}\n\
                    \n\
                    {\"kind\":\"tick\"}\n\
                    {\"kind\":\"command\",\"command\":\"rotate\"}\n";
        let log = ReplayLog::read_from(text.as_bytes()).unwrap();
        assert_eq!(log.header.seed, 3);
        assert_eq!(log.header.rotation, RotationMode::Geometric);
        assert_eq!(
            log.entries,
            vec![
                ReplayEntry::Tick,
                ReplayEntry::Command {
                    command: "rotate".into()
                }
            ]
        );
    }

    #[test]
    fn test_read_errors() {
        assert!(ReplayLog::read_from("".as_bytes()).is_err());
        assert!(ReplayLog::read_from("{\"seed\":1}".as_bytes()).is_err());
        let bad_entry = "{\"seed\":1,\"width\":10,\"height\":20,\"rotation\":\"fixed\"}\n{\"kind\":\"jump\"}\n";
        assert!(ReplayLog::read_from(bad_entry.as_bytes()).is_err());
    }

    #[test]
    fn test_header_dimensions_checked() {
        let zero = "{\"seed\":1,\"width\":0,\"height\":0,\"rotation\":\"fixed\"}\n";
        let err = ReplayLog::read_from(zero.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("width must be between"));

        let huge = "{\"seed\":1,\"width\":65535,\"height\":65535,\"rotation\":\"fixed\"}\n";
        assert!(ReplayLog::read_from(huge.as_bytes()).is_err());

        let tall = "{\"seed\":1,\"width\":10,\"height\":201,\"rotation\":\"fixed\"}\n";
        assert!(ReplayLog::read_from(tall.as_bytes()).is_err());
    }

    #[test]
    fn test_recorder_output_reads_back() {
        let mut recorder = Recorder::new(Vec::new(), header()).unwrap();
        recorder.record(&ReplayEntry::Tick).unwrap();
        recorder.record(&ReplayEntry::command(Command::Down)).unwrap();
        assert_eq!(recorder.entries(), 2);

        let bytes = recorder.finish().unwrap();
        let log = ReplayLog::read_from(bytes.as_slice()).unwrap();
        assert_eq!(log.header, header());
        assert_eq!(log.entries.len(), 2);
    }

    #[test]
    fn test_unknown_commands_are_skipped() {
        let mut plain = ReplayLog::new(header());
        plain.push(ReplayEntry::command(Command::Left));

        let mut noisy = plain.clone();
        noisy.entries.insert(
            0,
            ReplayEntry::Command {
                command: "hold".into(),
            },
        );

        assert_eq!(replay(&plain), replay(&noisy));
    }
}
