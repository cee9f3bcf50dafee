//! Replays a recorded game log and prints the final state.
//!
//! Usage: `blocks-replay PATH`

use anyhow::{bail, Result};

use tui_blocks::replay::{replay, ReplayLog};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path] = args.as_slice() else {
        bail!("usage: blocks-replay PATH");
    };

    let log = ReplayLog::load(path)?;
    eprintln!(
        "[Replay] {} entries, seed={} {}x{} rotation={}",
        log.entries.len(),
        log.header.seed,
        log.header.width,
        log.header.height,
        log.header.rotation.as_str()
    );

    let snap = replay(&log);
    println!("score: {}", snap.score);
    println!("rows: {}", snap.rows_cleared);
    println!("over: {}", snap.game_over);
    for row in snap.ascii_rows() {
        println!("{}", row);
    }
    Ok(())
}
