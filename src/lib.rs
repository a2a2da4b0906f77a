//! This crate offers the protocol core of a Redis client for no_std targets, focused on sorted set commands.
//! Both RESP2 and RESP3 protocol are supported.
//!
//! This crate consists of four parts:
//! * [codec module](crate::codec) for rendering scores, range boundaries and members to wire tokens
//! * [commands module](crate::commands) for validated command abstractions
//! * [reply module](crate::reply) for decoding replies to typed values
//! * [network module](crate::network) for dispatching commands and blocking call timeouts
//!
//! ```
//! use embedded_redis_core::codec::Boundary;
//! use embedded_redis_core::commands::range::RangeCommand;
//! use embedded_redis_core::commands::Request;
//! use embedded_redis_core::reply::{decode, ReplyUnit};
//!
//! let request = RangeCommand::by_score("leaderboard", Boundary::inclusive(10.0), Boundary::positive_infinity())
//!     .with_scores();
//! let shape = request.shape();
//!
//! let command = request.encode().unwrap();
//! assert_eq!("ZRANGE", command.keyword());
//!
//! let reply = ReplyUnit::Array(vec![ReplyUnit::bulk("alice"), ReplyUnit::bulk("12.5")]);
//! let members = decode::<f64>(reply, shape).unwrap().into_array().unwrap();
//! assert_eq!(1, members.len());
//! ```
#![cfg_attr(all(not(test), not(feature = "mock")), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]

extern crate alloc;

pub mod codec;

/// # Redis command abstractions
///
/// This crates includes abstractions for the sorted set commands, e.g.
/// [ZADD](crate::commands::zadd),
/// [ZRANGE](crate::commands::range),
/// [ZUNION/ZINTER/ZDIFF](crate::commands::algebra),
/// [ZPOPMIN/BZPOPMIN](crate::commands::pop),
/// [ZSCAN](crate::commands::scan), ...
///
/// Each abstraction is implementing the [Request](crate::commands::Request) trait. Parameters are
/// validated on encoding, so invalid combinations are rejected before anything is transmitted.
///
/// For executing arbitrary (not yet implemented) commands, [CustomCommand](crate::commands::custom)
/// may be used. As alternative you can create new commands by implementing the [Request](crate::commands::Request) trait.
pub mod commands;

/// # Dispatching and reply management
///
/// Commands are executed by a [Dispatcher](crate::network::Dispatcher) over any
/// [Transport](crate::network::Transport). [Connection](crate::network::Connection) is a transport
/// implementation for TCP sockets of an [embedded-nal](<https://docs.rs/embedded-nal/latest/embedded_nal/>)
/// network stack, supporting [RESP2](https://redis.io/docs/reference/protocol-spec/) and
/// [RESP3](https://github.com/antirez/RESP3/blob/master/spec.md).
///
/// Deadlines require a clock implementing [embedded-time](<https://docs.rs/embedded-time/latest/embedded_time/>).
/// Without clock, calls wait indefinitely.
///
/// ## Non-blocking reply management
///
/// Transmitted commands are represented as [PendingCall](crate::network::PendingCall). The reply may
/// be awaited blocking (`wait()`), checked without blocking (`ready()`) or awaited as
/// [core::future::Future].
///
/// ## Timeouts
///
/// * Regular commands use the dispatcher's default timeout. Zero waits indefinitely.
/// * Blocking commands (e.g. BZPOPMIN) with a server timeout of zero never time out on client side.
/// * Other blocking commands time out after the server timeout plus a grace margin (default 2 seconds).
///   A server side timeout is reported as [Value::Absent](crate::reply::Value::Absent), a client side
///   timeout as [CallError::Cancelled](crate::network::CallError::Cancelled).
///
/// ### Abandoned calls
///
/// Replies of cancelled or dropped calls are discarded on the next receive, so the mapping of
/// replies to calls stays intact.
pub mod network;

pub mod reply;
