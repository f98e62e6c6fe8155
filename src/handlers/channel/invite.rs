//! INVITE command handler.
//!
//! # RFC 2812 §3.2.7 - Invite message
//!
//! ## Syntax
//! ```text
//! INVITE <nickname> <channel>
//! ```
//!
//! Several nicknames or channels may be given; they pair up the same way as
//! KICK targets. The inviter must be on the channel, and an operator if the
//! channel is invite-only. The invitation admits the target once.

use ircserv_proto::{Message, ParsedCommand, Response, pair_targets};
use tracing::info;

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        let pairs = pair_targets(&cmd.channels, &cmd.users).ok_or_else(|| {
            HandlerError::Parse(ircserv_proto::ParseError::Syntax {
                command: cmd.verb().to_string(),
            })
        })?;

        for (channel, target) in pairs {
            invite_one(ctx, channel, target)?;
        }
        Ok(())
    }
}

fn invite_one(ctx: &mut Context<'_>, name: &str, target: &str) -> HandlerResult {
    let chan_name = format!("#{name}");
    let nick = ctx.nick();

    let Some(target_uid) = ctx.matrix.sessions.find_nick(target) else {
        ctx.reply(Response::err_nosuchnick(&nick, target));
        return Ok(());
    };
    let Some(channel) = ctx.matrix.channels.get(name) else {
        ctx.refuse(&chan_name, ChannelError::NoSuchChannel);
        return Ok(());
    };
    if !channel.is_member(ctx.uid) {
        ctx.refuse(&chan_name, ChannelError::NotOnChannel);
        return Ok(());
    }
    if channel.invite_only() && !channel.is_operator(ctx.uid) {
        ctx.refuse(&chan_name, ChannelError::ChanOpPrivsNeeded);
        return Ok(());
    }
    if channel.is_member(target_uid) {
        ctx.refuse(&chan_name, ChannelError::UserOnChannel(target.to_string()));
        return Ok(());
    }

    if let Some(channel) = ctx.matrix.channels.get_mut(name) {
        channel.invite(target_uid);
    }

    ctx.reply(Response::rpl_inviting(&nick, target, &chan_name));
    let invite = Message::command("INVITE", vec![target.to_string()], Some(chan_name.clone()))
        .with_prefix(ctx.user_prefix()?);
    ctx.send_to(target_uid, &invite);

    info!(uid = %ctx.uid, %nick, channel = %chan_name, %target, "invited user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn invite_notifies_both_sides() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        t.send(alice, "JOIN #test");
        t.clear();

        t.send(alice, "INVITE bob #test");
        assert_eq!(t.lines(alice), vec![":irc.test 341 alice bob #test"]);
        assert_eq!(
            t.lines(bob),
            vec![":alice!alice@127.0.0.1 INVITE bob :#test"]
        );
        assert!(t.matrix.channels.get("test").unwrap().is_invited(bob));
    }

    #[test]
    fn invite_only_requires_operator() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        let carol = registered(&mut t, "carol");
        t.send(alice, "JOIN #test");
        t.send(bob, "JOIN #test");
        t.send(alice, "MODE #test +i");
        t.clear();

        t.send(bob, "INVITE carol #test");
        assert_eq!(
            t.lines(bob),
            vec![":irc.test 482 bob #test :You're not channel operator"]
        );
        assert!(!t.matrix.channels.get("test").unwrap().is_invited(carol));
    }

    #[test]
    fn invite_errors() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        t.send(alice, "JOIN #test");
        t.send(bob, "JOIN #test");
        t.send(bob, "JOIN #other");
        t.clear();

        t.send(alice, "INVITE ghost #test");
        t.send(alice, "INVITE bob #nowhere");
        t.send(alice, "INVITE bob #other");
        t.send(alice, "INVITE bob #test");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 401 alice ghost :No such nick",
                ":irc.test 403 alice #nowhere :No such channel",
                ":irc.test 442 alice #other :You're not on that channel",
                ":irc.test 443 alice bob #test :is already on channel",
            ]
        );
    }
}
