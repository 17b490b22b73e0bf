//! STDIO transport implementation.
//!
//! Reads one request per line from stdin and writes one response per line
//! to stdout, strictly in order. A malformed line gets an error response and
//! never ends the loop; end of input does.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::TransportResult;
use crate::core::GatewayServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin is closed.
    pub async fn run(server: GatewayServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        let served = Self::serve(stdin, stdout, server).await?;

        info!("STDIO transport finished after {} requests", served);
        Ok(())
    }

    /// Serve line-delimited requests from `reader`, answering on `writer`.
    ///
    /// Each response is written and flushed before the next line is read.
    /// Blank lines are skipped. Returns the number of requests answered.
    pub async fn serve<R, W>(
        mut reader: R,
        mut writer: W,
        server: GatewayServer,
    ) -> TransportResult<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut served = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = trim_line_ending(&buf);
            if line.iter().all(u8::is_ascii_whitespace) {
                debug!("Skipping blank line");
                continue;
            }

            let response = server.handle_raw(line).await;

            let mut encoded = response.encode();
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
            served += 1;
        }

        Ok(served)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
