//! KICK command handler.
//!
//! # RFC 2812 §3.2.8 - Kick command
//!
//! ## Syntax
//! ```text
//! KICK <channel>{,<channel>} <user>{,<user>} [:<comment>]
//! ```
//!
//! ## Behavior
//! - One channel with N users, N channels with one user, or N channels with
//!   N users paired by position; any other shape was refused at validation
//! - Each pair is checked on its own and failures do not stop later pairs
//! - The KICK line goes to every member, the kicked user included

use ircserv_proto::{Message, ParsedCommand, Response, pair_targets};
use tracing::info;

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        let pairs = pair_targets(&cmd.channels, &cmd.users).ok_or_else(|| {
            HandlerError::Parse(ircserv_proto::ParseError::Syntax {
                command: cmd.verb().to_string(),
            })
        })?;
        let reason = cmd.trailing.clone().filter(|r| !r.is_empty());

        for (channel, target) in pairs {
            kick_one(ctx, channel, target, reason.as_deref())?;
        }
        Ok(())
    }
}

fn kick_one(ctx: &mut Context<'_>, name: &str, target: &str, reason: Option<&str>) -> HandlerResult {
    let chan_name = format!("#{name}");
    let nick = ctx.nick();

    let Some(channel) = ctx.matrix.channels.get(name) else {
        ctx.refuse(&chan_name, ChannelError::NoSuchChannel);
        return Ok(());
    };
    if !channel.is_member(ctx.uid) {
        ctx.refuse(&chan_name, ChannelError::NotOnChannel);
        return Ok(());
    }
    if !channel.is_operator(ctx.uid) {
        ctx.refuse(&chan_name, ChannelError::ChanOpPrivsNeeded);
        return Ok(());
    }

    let Some(target_uid) = ctx.matrix.sessions.find_nick(target) else {
        ctx.reply(Response::err_nosuchnick(&nick, target));
        return Ok(());
    };
    if target_uid == ctx.uid {
        ctx.reply(Response::err_unknownerror(&nick, "KICK", "You cannot kick yourself"));
        return Ok(());
    }
    if !channel.is_member(target_uid) {
        ctx.refuse(&chan_name, ChannelError::UserNotInChannel(target.to_string()));
        return Ok(());
    }

    let comment = reason.unwrap_or(nick.as_str()).to_string();
    let kick = Message::command("KICK", vec![chan_name.clone(), target.to_string()], Some(comment))
        .with_prefix(ctx.user_prefix()?);
    ctx.broadcast(name, &kick, None);
    ctx.matrix.leave_channel(name, target_uid);

    info!(uid = %ctx.uid, %nick, channel = %chan_name, %target, "kicked user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};
    use crate::state::Uid;

    fn setup(t: &mut TestServer) -> (Uid, Uid, Uid, Uid) {
        let op = registered(t, "op");
        let u1 = registered(t, "u1");
        let u2 = registered(t, "u2");
        let u3 = registered(t, "u3");
        for chan in ["#a", "#b"] {
            t.send(op, &format!("JOIN {chan}"));
            for u in [u1, u2, u3] {
                t.send(u, &format!("JOIN {chan}"));
            }
        }
        t.clear();
        (op, u1, u2, u3)
    }

    fn member(t: &TestServer, chan: &str, uid: Uid) -> bool {
        t.matrix.channels.get(chan).unwrap().is_member(uid)
    }

    #[test]
    fn one_user_from_many_channels() {
        let mut t = TestServer::new();
        let (op, u1, _, _) = setup(&mut t);
        t.send(op, "KICK #a,#b u1 :bye");
        assert!(!member(&t, "a", u1));
        assert!(!member(&t, "b", u1));
        assert_eq!(
            t.lines(u1),
            vec![
                ":op!op@127.0.0.1 KICK #a u1 :bye",
                ":op!op@127.0.0.1 KICK #b u1 :bye",
            ]
        );
    }

    #[test]
    fn many_users_from_one_channel() {
        let mut t = TestServer::new();
        let (op, u1, u2, u3) = setup(&mut t);
        t.send(op, "KICK #a u1,u2");
        assert!(!member(&t, "a", u1));
        assert!(!member(&t, "a", u2));
        assert!(member(&t, "a", u3));
        assert!(member(&t, "b", u1));
        assert_eq!(
            t.lines(u3),
            vec![
                ":op!op@127.0.0.1 KICK #a u1 :op",
                ":op!op@127.0.0.1 KICK #a u2 :op",
            ]
        );
    }

    #[test]
    fn positional_pairs() {
        let mut t = TestServer::new();
        let (op, u1, u2, _) = setup(&mut t);
        t.send(op, "KICK #a,#b u1,u2");
        assert!(!member(&t, "a", u1));
        assert!(member(&t, "b", u1));
        assert!(member(&t, "a", u2));
        assert!(!member(&t, "b", u2));
    }

    #[test]
    fn mismatched_shape_is_a_syntax_error() {
        let mut t = TestServer::new();
        let (op, u1, u2, u3) = setup(&mut t);
        t.send(op, "KICK #a,#b u1,u2,u3");
        assert_eq!(t.lines(op), vec![":irc.test 478 op KICK :Invalid KICK command"]);
        for u in [u1, u2, u3] {
            assert!(member(&t, "a", u));
            assert!(member(&t, "b", u));
        }
    }

    #[test]
    fn failures_are_per_pair() {
        let mut t = TestServer::new();
        let (op, u1, _, _) = setup(&mut t);
        t.send(op, "KICK #a ghost,op,u1");
        assert_eq!(
            t.lines(op),
            vec![
                ":irc.test 401 op ghost :No such nick",
                ":irc.test 400 op KICK :You cannot kick yourself",
                ":op!op@127.0.0.1 KICK #a u1 :op",
            ]
        );
        assert!(!member(&t, "a", u1));
    }

    #[test]
    fn non_operator_cannot_kick() {
        let mut t = TestServer::new();
        let (_, u1, u2, _) = setup(&mut t);
        t.send(u1, "KICK #a u2");
        assert_eq!(
            t.lines(u1),
            vec![":irc.test 482 u1 #a :You're not channel operator"]
        );
        assert!(member(&t, "a", u2));
    }

    #[test]
    fn operators_stay_members_after_kicks() {
        let mut t = TestServer::new();
        let (op, u1, _, _) = setup(&mut t);
        t.send(op, "MODE #a +o u1");
        t.send(op, "KICK #a u1");
        let chan = t.matrix.channels.get("a").unwrap();
        assert!(!chan.is_operator(u1));
        assert!(chan.members().all(|m| m == op || !chan.is_operator(m)));
    }
}
