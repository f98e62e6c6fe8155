//! PING and PONG handlers.

use ircserv_proto::{Message, ParsedCommand};

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // PING <token>
        let token = cmd.param_or_trailing().unwrap_or_default();
        let server = ctx.matrix.server_info.name.clone();

        let pong = Message::command("PONG", vec![server], Some(token.to_string()))
            .with_prefix(ctx.server_prefix());
        ctx.send_self(&pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, _ctx: &mut Context<'_>, _cmd: &ParsedCommand) -> HandlerResult {
        // No idle timer to reset; accepted and ignored.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn ping_echoes_token() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "PING :hello there");
        assert_eq!(t.lines(alice), vec![":irc.test PONG irc.test :hello there"]);
    }

    #[test]
    fn ping_without_token_is_no_origin() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "PING");
        assert_eq!(t.lines(alice), vec![":irc.test 409 alice :No origin specified"]);
    }

    #[test]
    fn pong_is_silent() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "PONG irc.test");
        assert!(t.lines(alice).is_empty());
    }
}
