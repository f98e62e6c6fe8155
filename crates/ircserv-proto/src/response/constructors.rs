//! Reply constructors for `Response`.
//!
//! Every constructor takes the addressee (`client`, the nickname or `*`
//! before one is set) first and returns an unprefixed [`Message`]; the server
//! stamps its own name on before sending.

use crate::message::Message;
use crate::response::Response;

macro_rules! impl_reply {
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str) -> Message {
            Self::reply(Response::$resp, vec![client.to_string()], $msg)
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Self::reply(
                Response::$resp,
                vec![client.to_string(), $arg.to_string()],
                $msg,
            )
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg1:ident, $arg2:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg1: &str, $arg2: &str) -> Message {
            Self::reply(
                Response::$resp,
                vec![client.to_string(), $arg1.to_string(), $arg2.to_string()],
                $msg,
            )
        }
    };
}

impl Response {
    fn reply(response: Response, params: Vec<String>, text: impl Into<String>) -> Message {
        Message::numeric(response, params, Some(text.into()))
    }

    // === 001-099 Registration ===

    /// `001 RPL_WELCOME`
    /// `:Welcome to the Internet Relay Network <nick>!<user>@<host>`
    pub fn rpl_welcome(client: &str, mask: &str) -> Message {
        Self::reply(
            Response::RPL_WELCOME,
            vec![client.to_string()],
            format!("Welcome to the Internet Relay Network {mask}"),
        )
    }

    /// `002 RPL_YOURHOST`
    pub fn rpl_yourhost(client: &str, server: &str, version: &str) -> Message {
        Self::reply(
            Response::RPL_YOURHOST,
            vec![client.to_string()],
            format!("Your host is {server}, running version ircserv {version}"),
        )
    }

    /// `003 RPL_CREATED`
    pub fn rpl_created(client: &str, date: &str) -> Message {
        Self::reply(
            Response::RPL_CREATED,
            vec![client.to_string()],
            format!("This server was created {date}"),
        )
    }

    /// `004 RPL_MYINFO`
    /// `<servername> <version> <user modes> <channel modes>`
    pub fn rpl_myinfo(client: &str, server: &str, version: &str) -> Message {
        Message::numeric(
            Response::RPL_MYINFO,
            vec![
                client.to_string(),
                server.to_string(),
                version.to_string(),
                "iow".to_string(),
                "itkol".to_string(),
            ],
            None,
        )
    }

    // === 200-399 Command replies ===

    /// `221 RPL_UMODEIS`
    pub fn rpl_umodeis(client: &str, modes: &str) -> Message {
        Message::numeric(
            Response::RPL_UMODEIS,
            vec![client.to_string(), modes.to_string()],
            None,
        )
    }

    /// `311 RPL_WHOISUSER`
    /// `<nick> <user> <host> * :<real name>`
    pub fn rpl_whoisuser(
        client: &str,
        nick: &str,
        user: &str,
        host: &str,
        realname: &str,
    ) -> Message {
        Self::reply(
            Response::RPL_WHOISUSER,
            vec![
                client.to_string(),
                nick.to_string(),
                user.to_string(),
                host.to_string(),
                "*".to_string(),
            ],
            realname,
        )
    }

    /// `312 RPL_WHOISSERVER`
    /// `<nick> <server> :<server info>`
    pub fn rpl_whoisserver(client: &str, nick: &str, server: &str, info: &str) -> Message {
        Self::reply(
            Response::RPL_WHOISSERVER,
            vec![client.to_string(), nick.to_string(), server.to_string()],
            info,
        )
    }

    impl_reply!(
        /// `318 RPL_ENDOFWHOIS`
        /// `<nick> :End of /WHOIS list`
        rpl_endofwhois, RPL_ENDOFWHOIS, nick, "End of /WHOIS list"
    );

    /// `319 RPL_WHOISCHANNELS`
    /// `<nick> :{[@]<channel>}`
    pub fn rpl_whoischannels(client: &str, nick: &str, channels: &str) -> Message {
        Self::reply(
            Response::RPL_WHOISCHANNELS,
            vec![client.to_string(), nick.to_string()],
            channels,
        )
    }

    /// `324 RPL_CHANNELMODEIS`
    /// `<channel> <modes> [<mode params>...]`
    pub fn rpl_channelmodeis(client: &str, channel: &str, modes: &[String]) -> Message {
        let mut params = vec![client.to_string(), channel.to_string()];
        params.extend(modes.iter().cloned());
        Message::numeric(Response::RPL_CHANNELMODEIS, params, None)
    }

    impl_reply!(
        /// `331 RPL_NOTOPIC`
        /// `<channel> :No topic is set`
        rpl_notopic, RPL_NOTOPIC, channel, "No topic is set"
    );

    /// `332 RPL_TOPIC`
    /// `<channel> :<topic>`
    pub fn rpl_topic(client: &str, channel: &str, topic: &str) -> Message {
        Self::reply(
            Response::RPL_TOPIC,
            vec![client.to_string(), channel.to_string()],
            topic,
        )
    }

    /// `341 RPL_INVITING`
    /// `<nick> <channel>`
    pub fn rpl_inviting(client: &str, nick: &str, channel: &str) -> Message {
        Message::numeric(
            Response::RPL_INVITING,
            vec![client.to_string(), nick.to_string(), channel.to_string()],
            None,
        )
    }

    /// `353 RPL_NAMREPLY`
    /// `= <channel> :<names>`
    pub fn rpl_namreply(client: &str, channel: &str, names: &str) -> Message {
        Self::reply(
            Response::RPL_NAMREPLY,
            vec![client.to_string(), "=".to_string(), channel.to_string()],
            names,
        )
    }

    impl_reply!(
        /// `366 RPL_ENDOFNAMES`
        /// `<channel> :End of /NAMES list.`
        rpl_endofnames, RPL_ENDOFNAMES, channel, "End of /NAMES list."
    );

    // === 400-599 Error replies ===

    /// `400 ERR_UNKNOWNERROR`
    /// `<command> :<text>`
    pub fn err_unknownerror(client: &str, command: &str, text: &str) -> Message {
        Self::reply(
            Response::ERR_UNKNOWNERROR,
            vec![client.to_string(), command.to_string()],
            text,
        )
    }

    impl_reply!(
        /// `401 ERR_NOSUCHNICK`
        /// `<nickname> :No such nick`
        err_nosuchnick, ERR_NOSUCHNICK, nickname, "No such nick"
    );

    impl_reply!(
        /// `403 ERR_NOSUCHCHANNEL`
        /// `<channel name> :No such channel`
        err_nosuchchannel, ERR_NOSUCHCHANNEL, channel, "No such channel"
    );

    impl_reply!(
        /// `404 ERR_CANNOTSENDTOCHAN`
        /// `<channel name> :Cannot send to channel`
        err_cannotsendtochan, ERR_CANNOTSENDTOCHAN, channel, "Cannot send to channel"
    );

    impl_reply!(
        /// `405 ERR_TOOMANYCHANNELS`
        /// `<channel name> :You have joined too many channels`
        err_toomanychannels, ERR_TOOMANYCHANNELS, channel, "You have joined too many channels"
    );

    impl_reply!(
        /// `407 ERR_TOOMANYTARGETS`
        /// `<command> :Too many targets`
        err_toomanytargets, ERR_TOOMANYTARGETS, command, "Too many targets"
    );

    impl_reply!(
        /// `409 ERR_NOORIGIN`
        /// `:No origin specified`
        err_noorigin, ERR_NOORIGIN, "No origin specified"
    );

    impl_reply!(
        /// `410 ERR_INVALIDCAPCMD`
        /// `<subcommand> :Invalid CAP subcommand`
        err_invalidcapcmd, ERR_INVALIDCAPCMD, subcommand, "Invalid CAP subcommand"
    );

    impl_reply!(
        /// `421 ERR_UNKNOWNCOMMAND`
        /// `<command> :Unknown command`
        err_unknowncommand, ERR_UNKNOWNCOMMAND, command, "Unknown command"
    );

    impl_reply!(
        /// `431 ERR_NONICKNAMEGIVEN`
        /// `:No nickname given`
        err_nonicknamegiven, ERR_NONICKNAMEGIVEN, "No nickname given"
    );

    impl_reply!(
        /// `432 ERR_ERRONEUSNICKNAME`
        /// `<nick> :Erroneous nickname`
        err_erroneusnickname, ERR_ERRONEOUSNICKNAME, nick, "Erroneous nickname"
    );

    impl_reply!(
        /// `433 ERR_NICKNAMEINUSE`
        /// `<nick> :Nickname is already in use`
        err_nicknameinuse, ERR_NICKNAMEINUSE, nick, "Nickname is already in use"
    );

    impl_reply!(
        /// `441 ERR_USERNOTINCHANNEL`
        /// `<nick> <channel> :They aren't on that channel`
        err_usernotinchannel, ERR_USERNOTINCHANNEL, nick, channel, "They aren't on that channel"
    );

    impl_reply!(
        /// `442 ERR_NOTONCHANNEL`
        /// `<channel> :You're not on that channel`
        err_notonchannel, ERR_NOTONCHANNEL, channel, "You're not on that channel"
    );

    impl_reply!(
        /// `443 ERR_USERONCHANNEL`
        /// `<user> <channel> :is already on channel`
        err_useronchannel, ERR_USERONCHANNEL, user, channel, "is already on channel"
    );

    impl_reply!(
        /// `451 ERR_NOTREGISTERED`
        /// `:You have not registered`
        err_notregistered, ERR_NOTREGISTERED, "You have not registered"
    );

    impl_reply!(
        /// `461 ERR_NEEDMOREPARAMS`
        /// `<command> :Not enough parameters`
        err_needmoreparams, ERR_NEEDMOREPARAMS, command, "Not enough parameters"
    );

    impl_reply!(
        /// `462 ERR_ALREADYREGISTRED`
        /// `:You may not reregister`
        err_alreadyregistred, ERR_ALREADYREGISTERED, "You may not reregister"
    );

    impl_reply!(
        /// `464 ERR_PASSWDMISMATCH`
        /// `:Password incorrect`
        err_passwdmismatch, ERR_PASSWDMISMATCH, "Password incorrect"
    );

    impl_reply!(
        /// `467 ERR_KEYSET`
        /// `<channel> :Channel key already set`
        err_keyset, ERR_KEYSET, channel, "Channel key already set"
    );

    impl_reply!(
        /// `471 ERR_CHANNELISFULL`
        /// `<channel> :Cannot join channel (+l)`
        err_channelisfull, ERR_CHANNELISFULL, channel, "Cannot join channel (+l)"
    );

    /// `472 ERR_UNKNOWNMODE`
    /// `<char> :is unknown mode char to me for <channel>`
    pub fn err_unknownmode(client: &str, mode: char, channel: &str) -> Message {
        Self::reply(
            Response::ERR_UNKNOWNMODE,
            vec![client.to_string(), mode.to_string()],
            format!("is unknown mode char to me for {channel}"),
        )
    }

    impl_reply!(
        /// `473 ERR_INVITEONLYCHAN`
        /// `<channel> :Cannot join channel (+i)`
        err_inviteonlychan, ERR_INVITEONLYCHAN, channel, "Cannot join channel (+i)"
    );

    impl_reply!(
        /// `475 ERR_BADCHANNELKEY`
        /// `<channel> :Cannot join channel (+k)`
        err_badchannelkey, ERR_BADCHANNELKEY, channel, "Cannot join channel (+k)"
    );

    /// `478` syntax error
    /// `<command> :Invalid <command> command`
    pub fn err_syntax(client: &str, command: &str) -> Message {
        Self::reply(
            Response::ERR_SYNTAX,
            vec![client.to_string(), command.to_string()],
            format!("Invalid {command} command"),
        )
    }

    impl_reply!(
        /// `479 ERR_BADCHANNAME`
        /// `<channel> :Illegal channel name`
        err_badchanname, ERR_BADCHANNAME, channel, "Illegal channel name"
    );

    impl_reply!(
        /// `482 ERR_CHANOPRIVSNEEDED`
        /// `<channel> :You're not channel operator`
        err_chanoprivsneeded, ERR_CHANOPRIVSNEEDED, channel, "You're not channel operator"
    );

    impl_reply!(
        /// `501 ERR_UMODEUNKNOWNFLAG`
        /// `:Unknown MODE flag`
        err_umodeunknownflag, ERR_UMODEUNKNOWNFLAG, "Unknown MODE flag"
    );

    impl_reply!(
        /// `502 ERR_USERSDONTMATCH`
        /// `:Cannot change mode for other users`
        err_usersdontmatch, ERR_USERSDONTMATCH, "Cannot change mode for other users"
    );

    // === 600-999 Extended ===

    /// `696 ERR_INVALIDMODEPARAM`
    /// `<target> <mode char> <parameter> :<description>`
    pub fn err_invalidmodeparam(
        client: &str,
        target: &str,
        mode: char,
        param: &str,
        description: &str,
    ) -> Message {
        Self::reply(
            Response::ERR_INVALIDMODEPARAM,
            vec![
                client.to_string(),
                target.to_string(),
                mode.to_string(),
                param.to_string(),
            ],
            description,
        )
    }
}
