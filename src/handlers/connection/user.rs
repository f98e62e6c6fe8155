//! USER command handler.

use ircserv_proto::ParsedCommand;

use super::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // USER <username> <mode> <unused> :<realname>
        let username = cmd.param(0).ok_or(HandlerError::NeedMoreParams)?.to_string();
        let realname = cmd
            .trailing
            .clone()
            .or_else(|| cmd.param(3).map(str::to_string))
            .unwrap_or_default();

        let session = ctx.session_mut()?;
        if session.registered {
            return Err(HandlerError::AlreadyRegistered);
        }
        session.username = Some(username);
        session.realname = realname;

        try_register(ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn user_stores_username_and_realname() {
        let mut t = TestServer::new();
        let uid = t.connect();
        t.send(uid, "PASS secret");
        t.send(uid, "USER al 0 * :Alice Liddell");
        let session = t.matrix.sessions.get(uid).unwrap();
        assert_eq!(session.username.as_deref(), Some("al"));
        assert_eq!(session.realname, "Alice Liddell");
        assert!(!session.registered);
    }

    #[test]
    fn short_user_is_rejected() {
        let mut t = TestServer::new();
        let uid = t.connect();
        t.send(uid, "PASS secret");
        t.send(uid, "USER al 0");
        assert_eq!(t.lines(uid), vec![":irc.test 461 * USER :Not enough parameters"]);
    }

    #[test]
    fn user_after_registration_is_refused() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "USER x 0 * :X");
        assert_eq!(t.lines(alice), vec![":irc.test 462 alice :You may not reregister"]);
    }
}
