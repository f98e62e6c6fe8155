//! Target resolution and fan-out shared by PRIVMSG and NOTICE.

use ircserv_proto::{Message, ParsedCommand, Response};

use crate::error::{ChannelError, HandlerResult};
use crate::handlers::Context;

/// Deliver the text of `cmd` to every target in the order they were given.
///
/// Channel targets need the sender to be a member and reach every other
/// member. Unresolved targets are answered individually when
/// `report_errors` is set; delivery to the remaining targets goes on.
pub(super) fn route_message(
    ctx: &mut Context<'_>,
    cmd: &ParsedCommand,
    verb: &'static str,
    report_errors: bool,
) -> HandlerResult {
    // Validation guarantees the text is present.
    let Some(text) = cmd.message_text() else {
        return Ok(());
    };
    let prefix = ctx.user_prefix()?;
    let nick = ctx.nick();

    for target in &cmd.targets {
        match target.strip_prefix('#') {
            Some(name) => {
                let error = match ctx.matrix.channels.get(name) {
                    None => Some(ChannelError::NoSuchChannel),
                    Some(channel) if !channel.is_member(ctx.uid) => {
                        Some(ChannelError::CannotSendToChan)
                    }
                    Some(_) => None,
                };
                match error {
                    Some(err) if report_errors => ctx.refuse(target, err),
                    Some(_) => {}
                    None => {
                        let msg = Message::command(verb, vec![target.clone()], Some(text.clone()))
                            .with_prefix(prefix.clone());
                        ctx.broadcast(name, &msg, Some(ctx.uid));
                    }
                }
            }
            None => match ctx.matrix.sessions.find_nick(target) {
                Some(uid) => {
                    let msg = Message::command(verb, vec![target.clone()], Some(text.clone()))
                        .with_prefix(prefix.clone());
                    ctx.send_to(uid, &msg);
                }
                None if report_errors => ctx.reply(Response::err_nosuchnick(&nick, target)),
                None => {}
            },
        }
    }

    Ok(())
}
