#![forbid(unsafe_code)]

use crate::McpServer;
use serde_json::Value;
use std::io::{BufRead, Write};

fn write_newline_json<W: Write>(
    writer: &mut W,
    resp: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(writer, "{}", serde_json::to_string(resp)?)?;
    writer.flush()?;
    Ok(())
}

/// Strictly sequential: each line is answered and flushed before the next one is read.
pub(crate) fn serve_lines<R: BufRead, W: Write>(
    server: &mut McpServer,
    mut reader: R,
    writer: &mut W,
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut served = 0u64;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Invalid UTF-8 decodes lossily and then fails as ordinary malformed JSON.
        let line = String::from_utf8_lossy(&buf);
        let resp = server.handle_line(line.trim());
        write_newline_json(writer, &resp)?;
        served += 1;
    }
    Ok(served)
}

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let served = serve_lines(server, stdin.lock(), &mut stdout)?;
    tracing::info!(requests = served, "stdin closed, shutting down");
    Ok(())
}
