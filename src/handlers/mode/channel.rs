//! Channel mode handling.
//!
//! Handles MODE commands for channels: `MODE <channel> [+/-modes [args...]]`.
//! Arguments are consumed in the order their letters appear.

use ircserv_proto::{
    ChannelExt, ChannelMode, Message, ModeChange, ModeError, Response, render_changes,
};
use tracing::info;

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::Context;
use crate::state::Channel;

/// Handle channel mode query/change.
pub fn handle_channel_mode(ctx: &mut Context<'_>, name: &str, args: &[String]) -> HandlerResult {
    let nick = ctx.nick();
    let chan_name = format!("#{name}");

    let Some(channel) = ctx.matrix.channels.get(name) else {
        ctx.refuse(&chan_name, ChannelError::NoSuchChannel);
        return Ok(());
    };

    let Some((modes, mode_args)) = args.split_first() else {
        // Query: the key is only shown to members
        let params = channel.mode_params(channel.is_member(ctx.uid));
        let reply = Response::rpl_channelmodeis(&nick, &chan_name, &params);
        ctx.reply(reply);
        return Ok(());
    };

    // Must be op to change modes
    if !channel.is_operator(ctx.uid) {
        ctx.refuse(&chan_name, ChannelError::ChanOpPrivsNeeded);
        return Ok(());
    }

    let changes = match ModeChange::<ChannelMode>::parse_channel(modes, mode_args) {
        Ok(changes) => changes,
        Err(ModeError::MissingArg { .. }) => return Err(HandlerError::NeedMoreParams),
    };

    let applied = apply_channel_modes(ctx, name, &changes);
    if applied.is_empty() {
        return Ok(());
    }

    let rendered = render_changes(&applied);
    let mode_msg = Message::command("MODE", [vec![chan_name.clone()], rendered.clone()].concat(), None)
        .with_prefix(ctx.user_prefix()?);
    ctx.broadcast(name, &mode_msg, None);

    info!(uid = %ctx.uid, %nick, channel = %chan_name, modes = %rendered.join(" "), "channel modes changed");
    Ok(())
}

/// Apply scanned changes to a channel, replying to the invoker for each
/// change that cannot be applied.
///
/// Returns the changes that took effect, with their arguments normalized.
fn apply_channel_modes(
    ctx: &mut Context<'_>,
    name: &str,
    changes: &[ModeChange<ChannelMode>],
) -> Vec<ModeChange<ChannelMode>> {
    let nick = ctx.nick();
    let chan_name = format!("#{name}");
    let key_len = ctx.matrix.limits.key_len;
    let mut applied = Vec::new();

    for change in changes {
        let arg = change.arg.as_deref().unwrap_or_default();
        let outcome = match change.mode {
            ChannelMode::InviteOnly => {
                with_channel(ctx, name, |c| c.set_invite_only(change.adding))
                    .then(|| ModeChange::new(change.adding, ChannelMode::InviteOnly))
                    .ok_or(None)
            }
            ChannelMode::ProtectedTopic => {
                with_channel(ctx, name, |c| c.set_topic_protected(change.adding))
                    .then(|| ModeChange::new(change.adding, ChannelMode::ProtectedTopic))
                    .ok_or(None)
            }
            ChannelMode::Key => key_change(ctx, name, change.adding, arg, key_len),
            ChannelMode::Limit => limit_change(ctx, name, change.adding, arg),
            ChannelMode::Oper => oper_change(ctx, name, change.adding, arg),
            ChannelMode::Unknown(c) => Err(Some(Response::err_unknownmode(&nick, c, &chan_name))),
        };

        match outcome {
            Ok(done) => applied.push(done),
            Err(Some(reply)) => ctx.reply(reply),
            Err(None) => {}
        }
    }

    applied
}

/// Outcome of one change: applied, refused with a reply, or a no-op.
type Outcome = Result<ModeChange<ChannelMode>, Option<Message>>;

fn with_channel(ctx: &mut Context<'_>, name: &str, f: impl FnOnce(&mut Channel) -> bool) -> bool {
    ctx.matrix.channels.get_mut(name).is_some_and(f)
}

fn key_change(ctx: &mut Context<'_>, name: &str, adding: bool, arg: &str, key_len: usize) -> Outcome {
    let nick = ctx.nick();
    let chan_name = format!("#{name}");

    // `+k` with an empty argument clears the key.
    if !adding || arg.is_empty() {
        return with_channel(ctx, name, |c| c.set_key(None))
            .then(|| ModeChange::new(false, ChannelMode::Key))
            .ok_or(None);
    }
    if ctx.matrix.channels.get(name).is_some_and(|c| c.key().is_some()) {
        return Err(Some(ChannelError::KeySet.to_reply(&nick, &chan_name)));
    }
    if !arg.is_valid_key_len(key_len) {
        return Err(Some(Response::err_invalidmodeparam(
            &nick,
            &chan_name,
            'k',
            arg,
            "Invalid channel key",
        )));
    }
    with_channel(ctx, name, |c| c.set_key(Some(arg.to_string())))
        .then(|| ModeChange::with_arg(true, ChannelMode::Key, arg))
        .ok_or(None)
}

fn limit_change(ctx: &mut Context<'_>, name: &str, adding: bool, arg: &str) -> Outcome {
    if !adding {
        return with_channel(ctx, name, |c| c.set_limit(None))
            .then(|| ModeChange::new(false, ChannelMode::Limit))
            .ok_or(None);
    }
    let limit = match arg.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            let nick = ctx.nick();
            return Err(Some(Response::err_invalidmodeparam(
                &nick,
                &format!("#{name}"),
                'l',
                arg,
                "Invalid limit",
            )));
        }
    };
    with_channel(ctx, name, |c| c.set_limit(Some(limit)))
        .then(|| ModeChange::with_arg(true, ChannelMode::Limit, limit.to_string()))
        .ok_or(None)
}

fn oper_change(ctx: &mut Context<'_>, name: &str, adding: bool, target: &str) -> Outcome {
    let nick = ctx.nick();
    let Some(target_uid) = ctx.matrix.sessions.find_nick(target) else {
        return Err(Some(Response::err_nosuchnick(&nick, target)));
    };
    if !ctx
        .matrix
        .channels
        .get(name)
        .is_some_and(|c| c.is_member(target_uid))
    {
        let refusal = ChannelError::UserNotInChannel(target.to_string());
        return Err(Some(refusal.to_reply(&nick, &format!("#{name}"))));
    }
    with_channel(ctx, name, |c| c.set_operator(target_uid, adding))
        .then(|| ModeChange::with_arg(adding, ChannelMode::Oper, target))
        .ok_or(None)
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};
    use crate::state::Uid;

    fn setup(t: &mut TestServer) -> (Uid, Uid) {
        let alice = registered(t, "alice");
        let bob = registered(t, "bob");
        t.send(alice, "JOIN #test");
        t.send(bob, "JOIN #test");
        t.clear();
        (alice, bob)
    }

    #[test]
    fn query_lists_active_modes() {
        let mut t = TestServer::new();
        let (alice, bob) = setup(&mut t);
        t.send(bob, "MODE #test");
        assert_eq!(t.lines(bob), vec![":irc.test 324 bob #test +"]);

        t.send(alice, "MODE #test +tk secret");
        t.send(bob, "MODE #test");
        assert_eq!(t.lines(bob).last().map(String::as_str), Some(":irc.test 324 bob #test +tk secret"));
    }

    #[test]
    fn query_hides_key_from_outsiders() {
        let mut t = TestServer::new();
        let (alice, _) = setup(&mut t);
        let eve = registered(&mut t, "eve");
        t.send(alice, "MODE #test +k hunter2");
        t.clear();

        t.send(eve, "MODE #test");
        assert_eq!(t.lines(eve), vec![":irc.test 324 eve #test +k"]);
    }

    #[test]
    fn non_operator_is_refused() {
        let mut t = TestServer::new();
        let (_, bob) = setup(&mut t);
        t.send(bob, "MODE #test +i");
        assert_eq!(
            t.lines(bob),
            vec![":irc.test 482 bob #test :You're not channel operator"]
        );
        assert!(!t.matrix.channels.get("test").unwrap().invite_only());
    }

    #[test]
    fn arguments_follow_flag_order() {
        let mut t = TestServer::new();
        let (alice, bob) = setup(&mut t);
        t.send(alice, "MODE #test +lko 5 pw bob");
        let expected = ":alice!alice@127.0.0.1 MODE #test +lko 5 pw bob";
        assert_eq!(t.lines(alice), vec![expected]);
        assert_eq!(t.lines(bob), vec![expected]);

        let chan = t.matrix.channels.get("test").unwrap();
        assert_eq!(chan.limit(), Some(5));
        assert_eq!(chan.key(), Some("pw"));
        assert!(chan.is_operator(bob));
    }

    #[test]
    fn missing_argument_aborts_everything() {
        let mut t = TestServer::new();
        let (alice, _) = setup(&mut t);
        t.send(alice, "MODE #test +ik");
        assert_eq!(
            t.lines(alice),
            vec![":irc.test 461 alice MODE :Not enough parameters"]
        );
        assert!(!t.matrix.channels.get("test").unwrap().invite_only());
    }

    #[test]
    fn unknown_letters_are_reported_individually() {
        let mut t = TestServer::new();
        let (alice, _) = setup(&mut t);
        t.send(alice, "MODE #test +ixzt");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 472 alice x :is unknown mode char to me for #test",
                ":irc.test 472 alice z :is unknown mode char to me for #test",
                ":alice!alice@127.0.0.1 MODE #test +it",
            ]
        );
    }

    #[test]
    fn key_rules() {
        let mut t = TestServer::new();
        let (alice, _) = setup(&mut t);
        t.send(alice, "MODE #test +k one");
        t.clear();

        t.send(alice, "MODE #test +k two");
        assert_eq!(
            t.lines(alice),
            vec![":irc.test 467 alice #test :Channel key already set"]
        );

        t.send(alice, "MODE #test +k :");
        assert_eq!(t.lines(alice), vec![":alice!alice@127.0.0.1 MODE #test -k"]);
        assert_eq!(t.matrix.channels.get("test").unwrap().key(), None);

        t.send(alice, "MODE #test +k a,b");
        assert_eq!(
            t.lines(alice),
            vec![":irc.test 696 alice #test k a,b :Invalid channel key"]
        );
    }

    #[test]
    fn bad_limits_are_rejected() {
        let mut t = TestServer::new();
        let (alice, _) = setup(&mut t);
        t.send(alice, "MODE #test +l 0");
        t.send(alice, "MODE #test +l many");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 696 alice #test l 0 :Invalid limit",
                ":irc.test 696 alice #test l many :Invalid limit",
            ]
        );
        assert_eq!(t.matrix.channels.get("test").unwrap().limit(), None);
    }

    #[test]
    fn operator_grants_need_a_member() {
        let mut t = TestServer::new();
        let (alice, _) = setup(&mut t);
        let carol = registered(&mut t, "carol");
        t.send(alice, "MODE #test +o carol");
        t.send(alice, "MODE #test +o ghost");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 441 alice carol #test :They aren't on that channel",
                ":irc.test 401 alice ghost :No such nick",
            ]
        );
        assert!(!t.matrix.channels.get("test").unwrap().is_operator(carol));
    }

    #[test]
    fn no_op_changes_are_not_broadcast() {
        let mut t = TestServer::new();
        let (alice, bob) = setup(&mut t);
        t.send(alice, "MODE #test -i");
        assert!(t.lines(alice).is_empty());
        assert!(t.lines(bob).is_empty());
    }

    #[test]
    fn deop_keeps_operator_subset() {
        let mut t = TestServer::new();
        let (alice, bob) = setup(&mut t);
        t.send(alice, "MODE #test +o bob");
        t.send(bob, "MODE #test -o alice");
        t.send(alice, "PART #test");
        let chan = t.matrix.channels.get("test").unwrap();
        assert!(chan.is_operator(bob));
        assert!(!chan.is_operator(alice));
        assert!(chan.members().all(|m| chan.is_member(m)));
    }
}
