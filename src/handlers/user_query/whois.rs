//! WHOIS command handler.
//!
//! `WHOIS <nick>{,<nick>}` answers 311, 319 (when the user is in any
//! channel), 312 and 318 per nickname; unknown nicknames get 401 and 318.
//! Allowed before registration.

use ircserv_proto::{ParsedCommand, Response};

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        let nick = ctx.nick();
        let targets = cmd
            .users
            .iter()
            .cloned()
            .chain(cmd.channels.iter().map(|c| format!("#{c}")));

        for target in targets {
            let replies = whois_replies(ctx, &nick, &target);
            for reply in replies {
                ctx.reply(reply);
            }
        }
        Ok(())
    }
}

fn whois_replies(ctx: &Context<'_>, nick: &str, target: &str) -> Vec<ircserv_proto::Message> {
    let matrix = &*ctx.matrix;
    let Some(session) = matrix
        .sessions
        .find_nick(target)
        .and_then(|uid| matrix.sessions.get(uid))
    else {
        return vec![
            Response::err_nosuchnick(nick, target),
            Response::rpl_endofwhois(nick, target),
        ];
    };

    let mut replies = vec![Response::rpl_whoisuser(
        nick,
        target,
        session.username.as_deref().unwrap_or("*"),
        &session.host,
        &session.realname,
    )];

    let channels: Vec<String> = matrix
        .channels
        .memberships(session.uid)
        .into_iter()
        .filter_map(|name| {
            let channel = matrix.channels.get(&name)?;
            let prefix = if channel.is_operator(session.uid) { "@" } else { "" };
            Some(format!("{prefix}#{name}"))
        })
        .collect();
    if !channels.is_empty() {
        replies.push(Response::rpl_whoischannels(nick, target, &channels.join(" ")));
    }

    let info = &matrix.server_info;
    replies.push(Response::rpl_whoisserver(nick, target, &info.name, &info.description));
    replies.push(Response::rpl_endofwhois(nick, target));
    replies
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn whois_known_user() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        t.send(bob, "JOIN #b");
        t.send(alice, "JOIN #a");
        t.send(bob, "JOIN #a");
        t.clear();

        t.send(alice, "WHOIS bob");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 311 alice bob bob 127.0.0.1 * :bob",
                ":irc.test 319 alice bob :#a @#b",
                ":irc.test 312 alice bob irc.test :ircserv test server",
                ":irc.test 318 alice bob :End of /WHOIS list",
            ]
        );
    }

    #[test]
    fn whois_unknown_user() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "WHOIS ghost");
        assert_eq!(
            t.lines(alice),
            vec![
                ":irc.test 401 alice ghost :No such nick",
                ":irc.test 318 alice ghost :End of /WHOIS list",
            ]
        );
    }
}
