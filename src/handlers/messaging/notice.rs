//! NOTICE command handler.
//!
//! Routed exactly like PRIVMSG, but failures are silent.

use ircserv_proto::ParsedCommand;

use super::delivery::route_message;
use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        route_message(ctx, cmd, "NOTICE", false)
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn notice_is_delivered_and_never_answered() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");

        t.send(alice, "NOTICE ghost,#nowhere,bob :heads up");
        assert!(t.lines(alice).is_empty());
        assert_eq!(t.lines(bob), vec![":alice!alice@127.0.0.1 NOTICE bob :heads up"]);
    }
}
