//! JOIN command handler.
//!
//! # RFC 2812 §3.2.1 - Join message
//!
//! ## Syntax
//! ```text
//! JOIN <channel>{,<channel>} [<key>{,<key>}]
//! ```
//!
//! ## Behavior
//! - Keys pair with channels by position
//! - An unknown channel is created with the joiner as operator; its key
//!   argument becomes the channel key
//! - Admission checks run in order: member limit, key, invitation
//! - A consumed invitation cannot be reused
//! - On success the JOIN is broadcast to every member, joiner included,
//!   followed by the topic (if any) and the names list for the joiner

use ircserv_proto::{ChannelExt, Message, ParsedCommand, Response};
use tracing::info;

use super::names::send_names;
use crate::error::{ChannelError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        for (i, name) in cmd.channels.iter().enumerate() {
            let key = cmd.passwords.get(i).map(String::as_str);
            join_one(ctx, name, key)?;
        }
        Ok(())
    }
}

fn join_one(ctx: &mut Context<'_>, name: &str, key: Option<&str>) -> HandlerResult {
    let chan_name = format!("#{name}");
    let nick = ctx.nick();
    let limits = &ctx.matrix.limits;
    let (max_channels, channel_len, key_len) =
        (limits.max_channels_per_user, limits.channel_len, limits.key_len);

    if ctx.session()?.channel_count >= max_channels {
        ctx.refuse(&chan_name, ChannelError::TooManyChannels);
        return Ok(());
    }
    if !chan_name.is_channel_name_len(channel_len) {
        ctx.refuse(&chan_name, ChannelError::BadChannelName);
        return Ok(());
    }

    match ctx.matrix.channels.get(name) {
        Some(channel) => {
            if channel.is_member(ctx.uid) {
                ctx.refuse(&chan_name, ChannelError::UserOnChannel(nick.clone()));
                return Ok(());
            }
            if let Err(err) = channel.check_admission(ctx.uid, key) {
                ctx.refuse(&chan_name, err);
                return Ok(());
            }
            ctx.matrix.enter_channel(name, ctx.uid, None);
        }
        None => {
            if let Some(key) = key
                && !key.is_valid_key_len(key_len)
            {
                ctx.reply(Response::err_invalidmodeparam(
                    &nick,
                    &chan_name,
                    'k',
                    key,
                    "Invalid channel key",
                ));
                return Ok(());
            }
            ctx.matrix.enter_channel(name, ctx.uid, key.map(str::to_string));
        }
    }

    info!(uid = %ctx.uid, %nick, channel = %chan_name, "joined channel");

    let join = Message::command("JOIN", vec![chan_name.clone()], None).with_prefix(ctx.user_prefix()?);
    ctx.broadcast(name, &join, None);

    let topic = ctx
        .matrix
        .channels
        .get(name)
        .and_then(|c| c.topic().map(str::to_string));
    if let Some(topic) = topic {
        ctx.reply(Response::rpl_topic(&nick, &chan_name, &topic));
    }
    send_names(ctx, name);
    Ok(())
}
