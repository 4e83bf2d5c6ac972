//! Periodic sampling timer for the button debouncer.
//!
//! On ESP-IDF the callback runs from a periodic `esp_timer`, dispatched in
//! the ESP timer task (not ISR).  The task blocks between expiries, so a
//! 1 ms period never busy-waits and never competes with the control loop.
//! A `std::thread::sleep` loop cannot do this: requests shorter than one
//! FreeRTOS tick become `esp_rom_delay_us` spins.
//!
//! On the host a plain thread sleeps between calls.
//!
//! The callback must stay short (a few pin reads and atomic stores); every
//! other `esp_timer` callback in the system shares its task.

use crate::Result;

#[cfg(target_os = "espidf")]
pub use esp_impl::PeriodicTimer;
#[cfg(not(target_os = "espidf"))]
pub use host_impl::PeriodicTimer;

type Callback = Box<dyn FnMut() + Send + 'static>;

fn boxed(f: impl FnMut() + Send + 'static) -> Callback {
    Box::new(f)
}

#[cfg(target_os = "espidf")]
mod esp_impl {
    use esp_idf_svc::sys::{
        esp, esp_timer_create, esp_timer_create_args_t, esp_timer_delete,
        esp_timer_dispatch_t_ESP_TIMER_TASK, esp_timer_handle_t, esp_timer_start_periodic,
        esp_timer_stop,
    };
    use log::{error, info};

    use super::{Callback, Result, boxed};
    use crate::Error;

    /// Runs a callback every period until dropped.
    pub struct PeriodicTimer {
        handle: esp_timer_handle_t,
        /// Double box so the timer argument is a thin pointer.
        _callback: Box<Callback>,
    }

    unsafe extern "C" fn tick_cb(arg: *mut core::ffi::c_void) {
        // SAFETY: `arg` points at the `Callback` owned by the
        // `PeriodicTimer`, which deletes the timer before freeing it.  Only
        // the timer task calls this, so the `&mut` is unique.
        let callback = unsafe { &mut *arg.cast::<Callback>() };
        callback();
    }

    impl PeriodicTimer {
        /// `name` must be null-terminated (e.g. `"debounce\0"`).
        pub fn start(
            name: &'static str,
            period_ms: u32,
            f: impl FnMut() + Send + 'static,
        ) -> Result<Self> {
            let mut callback = Box::new(boxed(f));
            let args = esp_timer_create_args_t {
                callback: Some(tick_cb),
                arg: core::ptr::from_mut::<Callback>(&mut *callback).cast(),
                dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                name: name.as_ptr().cast(),
                skip_unhandled_events: true,
            };

            let mut handle: esp_timer_handle_t = core::ptr::null_mut();
            // SAFETY: `args` is fully initialised and `handle` is a valid
            // out-pointer.
            esp!(unsafe { esp_timer_create(&args, &mut handle) }).map_err(|e| {
                error!("Sample timer: create failed: {}", e);
                Error::Init("sample timer")
            })?;

            let timer = Self {
                handle,
                _callback: callback,
            };
            // SAFETY: `handle` was just created and is not running.
            esp!(unsafe { esp_timer_start_periodic(timer.handle, u64::from(period_ms) * 1000) })
                .map_err(|e| {
                    error!("Sample timer: start failed: {}", e);
                    Error::Init("sample timer")
                })?;

            info!(
                "Sample timer '{}' every {} ms",
                name.trim_end_matches('\0'),
                period_ms
            );
            Ok(timer)
        }
    }

    impl Drop for PeriodicTimer {
        fn drop(&mut self) {
            // SAFETY: `handle` is valid for the life of `self`.  Stopping an
            // already-stopped timer only returns an error code.
            unsafe {
                esp_timer_stop(self.handle);
                esp_timer_delete(self.handle);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host_impl {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread::JoinHandle;
    use std::time::Duration;

    use log::{info, warn};

    use super::{Result, boxed};
    use crate::Error;

    /// Runs a callback every period until dropped.
    pub struct PeriodicTimer {
        stop: Arc<AtomicBool>,
        worker: Option<JoinHandle<()>>,
    }

    impl PeriodicTimer {
        /// `name` must be null-terminated (e.g. `"debounce\0"`).
        pub fn start(
            name: &'static str,
            period_ms: u32,
            f: impl FnMut() + Send + 'static,
        ) -> Result<Self> {
            let stop = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&stop);
            let mut callback = boxed(f);
            let period = Duration::from_millis(u64::from(period_ms.max(1)));
            let display_name = name.trim_end_matches('\0');

            let worker = std::thread::Builder::new()
                .name(display_name.into())
                .spawn(move || {
                    while !flag.load(Ordering::Acquire) {
                        callback();
                        std::thread::sleep(period);
                    }
                })
                .map_err(|e| {
                    warn!("Sample timer: spawn failed: {}", e);
                    Error::Init("sample timer")
                })?;

            info!("Sample timer '{}' every {} ms (host)", display_name, period_ms);
            Ok(Self {
                stop,
                worker: Some(worker),
            })
        }
    }

    impl Drop for PeriodicTimer {
        fn drop(&mut self) {
            self.stop.store(true, Ordering::Release);
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }
    }
}
