//! CAP command handler.
//!
//! No capabilities are offered. LS and LIST return empty lists, every REQ is
//! refused, END is accepted silently. Clients that probe with CAP before
//! PASS/NICK/USER keep working.

use ircserv_proto::{Message, ParsedCommand, Response};

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

pub struct CapHandler;

impl Handler for CapHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // CAP <subcommand> [:<capabilities>]
        let sub = cmd.param_or_trailing().unwrap_or_default().to_ascii_uppercase();
        let nick = ctx.nick();

        let reply = match sub.as_str() {
            "LS" | "LIST" => cap_reply(&nick, &sub, String::new()),
            "REQ" => {
                let requested = cmd
                    .trailing
                    .clone()
                    .or_else(|| cmd.param(1).map(str::to_string))
                    .unwrap_or_default();
                cap_reply(&nick, "NAK", requested)
            }
            "END" => return Ok(()),
            _ => {
                ctx.reply(Response::err_invalidcapcmd(&nick, &sub));
                return Ok(());
            }
        };

        let reply = reply.with_prefix(ctx.server_prefix());
        ctx.send_self(&reply);
        Ok(())
    }
}

fn cap_reply(nick: &str, sub: &str, caps: String) -> Message {
    Message::command("CAP", vec![nick.to_string(), sub.to_string()], Some(caps))
}
