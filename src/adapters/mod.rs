//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                     |
//! |----------------|--------------|---------------------------------|
//! | `entropy`      | EntropyPort  | `rand` StdRng (seeded or OS)    |
//! | `time`         | TimePort     | Host local wall clock           |
//! | `log_sink`     | EventSink    | `log` facade                    |
//! | `channel_sink` | EventSink    | Bounded embassy-sync channel    |
//! | `config_file`  | ConfigPort   | JSON file on disk               |

pub mod channel_sink;
pub mod config_file;
pub mod entropy;
pub mod log_sink;
pub mod time;
