// Formatting helpers and the console-backed logger.

use wasm_bindgen::JsValue;

pub fn format_distance(d: f64, unit: &str) -> String {
    format!("{:.3}{}", d, unit)
}

pub fn format_angle(deg: f64) -> String {
    format!("{:.1}°", deg)
}

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

pub fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
        clog(&format!("logging at {}", level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_has_three_decimals_and_unit() {
        assert_eq!(format_distance(3.0, "m"), "3.000m");
        assert_eq!(format_distance(1.23456, "ft"), "1.235ft");
    }

    #[test]
    fn angle_has_one_decimal() {
        assert_eq!(format_angle(90.0), "90.0°");
        assert_eq!(format_angle(53.130102), "53.1°");
    }
}
