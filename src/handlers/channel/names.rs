//! NAMES command handler.

use ircserv_proto::{ParsedCommand, Response};

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

pub struct NamesHandler;

impl Handler for NamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        // NAMES [<channel>{,<channel>}]
        if cmd.channels.is_empty() {
            for name in ctx.matrix.channels.names() {
                send_names_list(ctx, &name);
            }
            let nick = ctx.nick();
            ctx.reply(Response::rpl_endofnames(&nick, "*"));
            return Ok(());
        }

        for name in &cmd.channels {
            send_names(ctx, name);
        }
        Ok(())
    }
}

/// RPL_NAMREPLY (if the channel exists) followed by RPL_ENDOFNAMES.
pub(super) fn send_names(ctx: &mut Context<'_>, channel: &str) {
    send_names_list(ctx, channel);
    let nick = ctx.nick();
    ctx.reply(Response::rpl_endofnames(&nick, &format!("#{channel}")));
}

fn send_names_list(ctx: &mut Context<'_>, channel: &str) {
    let Some(chan) = ctx.matrix.channels.get(channel) else {
        return;
    };
    let names = ctx.matrix.names_list(chan);
    let nick = ctx.nick();
    ctx.reply(Response::rpl_namreply(&nick, &format!("#{channel}"), &names));
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn names_for_one_channel() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        t.send(alice, "JOIN #test");
        t.send(bob, "JOIN #test");
        t.clear();

        t.send(bob, "NAMES #test");
        assert_eq!(
            t.lines(bob),
            vec![
                ":irc.test 353 bob = #test :@alice bob",
                ":irc.test 366 bob #test :End of /NAMES list.",
            ]
        );
    }

    #[test]
    fn names_for_unknown_channel_only_ends() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "NAMES #nowhere");
        assert_eq!(
            t.lines(alice),
            vec![":irc.test 366 alice #nowhere :End of /NAMES list."]
        );
    }

    #[test]
    fn names_without_arguments_lists_every_channel() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "JOIN #a,#b");
        t.clear();
        t.send(alice, "NAMES");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 353 alice = #a :@alice",
                ":irc.test 353 alice = #b :@alice",
                ":irc.test 366 alice * :End of /NAMES list.",
            ]
        );
    }
}
