//! TOPIC command handler.
//!
//! # RFC 2812 §3.2.4 - Topic message
//!
//! ## Syntax
//! ```text
//! TOPIC <channel> [:<topic>]
//! ```
//!
//! ## Behavior
//! - No trailing field: report the topic (332) or its absence (331)
//! - Empty trailing field (`TOPIC #chan :`): clear the topic
//! - Otherwise set it; `+t` channels require operator status for both
//! - Changes are broadcast to every member, the setter included

use ircserv_proto::{Message, ParsedCommand, Response};
use tracing::info;

use crate::error::{ChannelError, HandlerResult};
use crate::handlers::{Context, Handler};

pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, cmd: &ParsedCommand) -> HandlerResult {
        let nick = ctx.nick();

        // Validation guarantees exactly one target.
        let Some(name) = cmd.channels.first() else {
            if let Some(target) = cmd.users.first() {
                ctx.refuse(target, ChannelError::NoSuchChannel);
            }
            return Ok(());
        };
        let chan_name = format!("#{name}");

        let Some(channel) = ctx.matrix.channels.get(name) else {
            ctx.refuse(&chan_name, ChannelError::NoSuchChannel);
            return Ok(());
        };
        if !channel.is_member(ctx.uid) {
            ctx.refuse(&chan_name, ChannelError::NotOnChannel);
            return Ok(());
        }

        let Some(topic) = &cmd.trailing else {
            let reply = match channel.topic() {
                Some(topic) => Response::rpl_topic(&nick, &chan_name, topic),
                None => Response::rpl_notopic(&nick, &chan_name),
            };
            ctx.reply(reply);
            return Ok(());
        };

        if channel.topic_protected() && !channel.is_operator(ctx.uid) {
            ctx.refuse(&chan_name, ChannelError::ChanOpPrivsNeeded);
            return Ok(());
        }

        if let Some(channel) = ctx.matrix.channels.get_mut(name) {
            channel.set_topic(topic.as_str());
        }
        let change = Message::command("TOPIC", vec![chan_name.clone()], Some(topic.clone()))
            .with_prefix(ctx.user_prefix()?);
        ctx.broadcast(name, &change, None);

        info!(
            uid = %ctx.uid,
            %nick,
            channel = %chan_name,
            cleared = cmd.trailing_empty,
            "topic changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{TestServer, registered};

    #[test]
    fn query_set_and_clear() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "JOIN #test");
        t.clear();

        t.send(alice, "TOPIC #test");
        assert_eq!(t.lines(alice), vec![":irc.test 331 alice #test :No topic is set"]);

        t.send(alice, "TOPIC #test :hello world");
        assert_eq!(
            t.lines(alice),
            vec![":alice!alice@127.0.0.1 TOPIC #test :hello world"]
        );
        t.send(alice, "TOPIC #test");
        assert_eq!(t.lines(alice), vec![":irc.test 332 alice #test :hello world"]);

        t.send(alice, "TOPIC #test :");
        assert_eq!(t.lines(alice), vec![":alice!alice@127.0.0.1 TOPIC #test :"]);
        assert_eq!(t.matrix.channels.get("test").unwrap().topic(), None);
    }

    #[test]
    fn protected_topic_clear_needs_operator() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        t.send(alice, "JOIN #test");
        t.send(bob, "JOIN #test");
        t.send(alice, "MODE #test +t");
        t.send(alice, "TOPIC #test :keep me");
        t.clear();

        t.send(bob, "TOPIC #test :");
        assert_eq!(
            t.lines(bob),
            vec![":irc.test 482 bob #test :You're not channel operator"]
        );
        assert_eq!(t.matrix.channels.get("test").unwrap().topic(), Some("keep me"));

        t.send(alice, "TOPIC #test :");
        let expected = ":alice!alice@127.0.0.1 TOPIC #test :";
        assert_eq!(t.lines(alice), vec![expected]);
        assert_eq!(t.lines(bob), vec![expected]);
        assert_eq!(t.matrix.channels.get("test").unwrap().topic(), None);
    }

    #[test]
    fn unprotected_topic_is_open_to_members() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        let bob = registered(&mut t, "bob");
        let carol = registered(&mut t, "carol");
        t.send(alice, "JOIN #test");
        t.send(bob, "JOIN #test");
        t.clear();

        t.send(bob, "TOPIC #test :from bob");
        assert_eq!(t.matrix.channels.get("test").unwrap().topic(), Some("from bob"));

        t.send(carol, "TOPIC #test :intruder");
        assert_eq!(
            t.lines(carol),
            vec![":irc.test 442 carol #test :You're not on that channel"]
        );
    }

    #[test]
    fn several_channels_is_a_syntax_error() {
        let mut t = TestServer::new();
        let alice = registered(&mut t, "alice");
        t.send(alice, "TOPIC #a,#b :x");
        assert_eq!(t.lines(alice), vec![":irc.test 478 alice TOPIC :Invalid TOPIC command"]);
    }
}
