//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | ClockPort          | wrapped clock                |
//! |                | DisplayPort        | wrapped display              |
//! |                | ActuatorPort       | feed motor GPIO              |
//! |                | IndicatorPort      | alarm LED GPIOs              |
//! |                | ButtonSource       | button GPIOs (`HalButton`)   |
//! | `log_display`  | DisplayPort        | in-memory 16×2 framebuffer   |
//! | `log_sink`     | EventSink          | Serial log output            |
//! | `time`         | ClockPort, TimePort| system time / ESP32 timer    |

pub mod hardware;
pub mod log_display;
pub mod log_sink;
pub mod time;
