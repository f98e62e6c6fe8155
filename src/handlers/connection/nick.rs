//! NICK command handler.
//!
//! Before registration NICK only records the nickname. Afterwards it renames
//! the session and tells everyone who shares a channel with it, once each.

use ircserv_proto::{Message, ParsedCommand, is_valid_nick};
use tracing::info;

use super::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // NICK <nickname>
        let nick = cmd.param_or_trailing().unwrap_or_default();

        if !is_valid_nick(nick, ctx.matrix.limits.nick_len) {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        match ctx.matrix.sessions.find_nick(nick) {
            Some(owner) if owner == ctx.uid => return Ok(()),
            Some(_) => return Err(HandlerError::NicknameInUse(nick.to_string())),
            None => {}
        }

        if !ctx.session()?.registered {
            ctx.session_mut()?.nick = Some(nick.to_string());
            return try_register(ctx);
        }

        let old_prefix = ctx.user_prefix()?;
        let old_nick = ctx.nick();
        let change = Message::command("NICK", vec![], Some(nick.to_string())).with_prefix(old_prefix);

        let peers = ctx.matrix.channel_peers(ctx.uid);
        ctx.session_mut()?.nick = Some(nick.to_string());
        ctx.send_self(&change);
        ctx.outbox.push_all(peers, &change);

        info!(uid = %ctx.uid, old = %old_nick, new = %nick, "nick changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn invalid_nick_is_erroneous() {
        let mut t = TestServer::new();
        let uid = t.connect();
        t.send(uid, "PASS secret");
        t.send(uid, "NICK 9lives");
        assert_eq!(t.lines(uid), vec![":irc.test 432 * 9lives :Erroneous nickname"]);
        t.send(uid, "NICK");
        assert_eq!(t.lines(uid), vec![":irc.test 431 * :No nickname given"]);
    }

    #[test]
    fn unregistered_nick_does_not_block_others() {
        let mut t = TestServer::new();
        let first = t.connect();
        t.send(first, "PASS secret");
        t.send(first, "NICK alice");

        let alice = registered(&mut t, "alice");
        assert!(t.matrix.sessions.get(alice).unwrap().registered);
    }

    #[test]
    fn nick_in_use_by_registered_session() {
        let mut t = TestServer::new();
        registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        t.send(bob, "NICK alice");
        assert_eq!(
            t.lines(bob),
            vec![":irc.test 433 bob alice :Nickname is already in use"]
        );
    }

    #[test]
    fn nick_change_reaches_each_peer_once() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        let carol = registered(&mut t, "carol");
        for chan in ["#a", "#b"] {
            t.send(alice, &format!("JOIN {chan}"));
            t.send(bob, &format!("JOIN {chan}"));
        }
        t.clear();

        t.send(alice, "NICK alicia");
        let expected = ":alice!alice@127.0.0.1 NICK :alicia";
        assert_eq!(t.lines(alice), vec![expected]);
        assert_eq!(t.lines(bob), vec![expected]);
        assert!(t.lines(carol).is_empty());
        assert_eq!(t.matrix.sessions.find_nick("alicia"), Some(alice));
        assert_eq!(t.matrix.sessions.find_nick("alice"), None);
    }
}
