// file: src/gateway/console.rs
// description: stdout gateway used by the one-shot `ask` command

use crate::error::Result;
use crate::gateway::MessageGateway;

#[derive(Debug, Default, Clone)]
pub struct ConsoleGateway;

impl MessageGateway for ConsoleGateway {
    async fn send(&self, _chat_id: &str, text: &str) -> Result<()> {
        println!("\n{}\n", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_send_never_fails() {
        let gateway = ConsoleGateway;
        tokio_test::assert_ok!(tokio_test::block_on(gateway.send("console", "Topic: Qatar")));
    }
}
