//! PART command handler.
//!
//! # RFC 2812 §3.2.2 - Part message
//!
//! ## Syntax
//! ```text
//! PART <channel>{,<channel>} [:<reason>]
//! ```
//!
//! ## Behavior
//! - The PART line goes to every member, the parting user included
//! - A channel left empty is destroyed

use ircserv_proto::{Message, ParsedCommand};
use tracing::info;

use crate::error::{ChannelError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        let reason = cmd.trailing.clone().filter(|r| !r.is_empty());

        for target in &cmd.targets {
            match target.strip_prefix('#') {
                Some(name) => leave_channel(ctx, name, reason.as_deref())?,
                // Targets without a `#` cannot name a channel.
                None => ctx.refuse(target, ChannelError::NoSuchChannel),
            }
        }
        Ok(())
    }
}

fn leave_channel(ctx: &mut Context<'_>, name: &str, reason: Option<&str>) -> HandlerResult {
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

    let part = Message::command("PART", vec![chan_name.clone()], reason.map(str::to_string))
        .with_prefix(ctx.user_prefix()?);
    ctx.broadcast(name, &part, None);
    ctx.matrix.leave_channel(name, ctx.uid);

    info!(uid = %ctx.uid, %nick, channel = %chan_name, "parted channel");
    Ok(())
}
