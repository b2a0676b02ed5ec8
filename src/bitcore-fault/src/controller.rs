use core::convert::Infallible;

use bitcore_debug::{log, println};
use critical_section::CriticalSection;
use embedded_hal::delay::DelayNs;
use portable_atomic::{AtomicBool, Ordering};

use crate::{Glyph, StatusCode, DISTRESS_GLYPH, GLYPH_SIZE, PANIC_INTERVAL_MS};

/// Output surface for the distress glyph.
pub trait FaultDisplay {
    /// Shows `glyph` followed by `code`.
    ///
    /// This runs with interrupts disabled, so it must not wait for an interrupt.
    fn show(&mut self, glyph: &Glyph, code: StatusCode);
}

/// Unconditional device reset.
pub trait HardReset {
    /// Resets the device.
    fn reset(&mut self) -> !;
}

/// Shows faults on the debug console, as text and as the 5×5 image.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl FaultDisplay for ConsoleDisplay {
    fn show(&mut self, glyph: &Glyph, code: StatusCode) {
        if !bitcore_debug::console_enabled() {
            return;
        }

        if code == StatusCode::NONE {
            println!("{}", glyph.text());
        } else {
            println!("{} {}", glyph.text(), code.digits().as_str());
        }
        for y in 0..GLYPH_SIZE {
            println!("{}", render_row(glyph, y).as_str());
        }
    }
}

/// Draws row `y` of `glyph` with `#` for lit and `.` for dark pixels.
fn render_row(glyph: &Glyph, y: usize) -> heapless::String<GLYPH_SIZE> {
    (0..GLYPH_SIZE)
        .map(|x| if glyph.is_lit(x, y) { '#' } else { '.' })
        .collect()
}

/// The fault state machine.
///
/// Entering a fault disables interrupts for good, then shows [`DISTRESS_GLYPH`] and the status
/// code once per interval. With an iteration budget of `n > 0`, the glyph is shown `n` times and
/// the device is reset afterwards; with `0`, it is shown until the device is power cycled.
pub struct FaultController<D, W, R> {
    display: D,
    delay: W,
    reset: R,
    interval_ms: u32,
}

impl<D: FaultDisplay, W: DelayNs, R: HardReset> FaultController<D, W, R> {
    /// Creates a controller showing faults on `display` for [`PANIC_INTERVAL_MS`] per iteration.
    pub const fn new(display: D, delay: W, reset: R) -> Self {
        Self {
            display,
            delay,
            reset,
            interval_ms: PANIC_INTERVAL_MS,
        }
    }

    /// Sets the time the glyph is shown per iteration.
    #[must_use]
    pub fn with_interval(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Enters the fault state with the global [panic timeout](crate::panic_timeout).
    pub fn panic(&mut self, code: impl Into<StatusCode>) -> ! {
        self.panic_with_timeout(code, crate::panic_timeout())
    }

    /// Enters the fault state, resetting after `iterations` renders (`0`: never).
    pub fn panic_with_timeout(&mut self, code: impl Into<StatusCode>, iterations: u32) -> ! {
        let code = code.into();
        // The critical section is never left on the way to the reset.
        match critical_section::with(|cs| self.halt(cs, code, iterations)) {}
    }

    /// Like [`panic_with_timeout()`](Self::panic_with_timeout), unless `latch` shows that a fault
    /// is already being handled.
    ///
    /// A fault raised while handling a fault does not touch the display: it resets right away if
    /// `iterations` is non-zero, and halts otherwise.
    pub fn panic_latched(
        &mut self,
        latch: &FaultLatch,
        code: impl Into<StatusCode>,
        iterations: u32,
    ) -> ! {
        let code = code.into();
        match critical_section::with(|cs| {
            if latch.try_enter() {
                self.halt(cs, code, iterations)
            } else {
                self.halt_nested(cs, iterations)
            }
        }) {}
    }

    fn halt(&mut self, _cs: CriticalSection<'_>, code: StatusCode, iterations: u32) -> Infallible {
        log::error!(
            "fault: status {=u8}, {=u32} iterations before reset",
            code.get(),
            iterations
        );

        let mut shown: u32 = 0;
        while iterations == 0 || shown < iterations {
            self.display.show(&DISTRESS_GLYPH, code);
            self.delay.delay_ms(self.interval_ms);
            shown = shown.saturating_add(1);
        }

        log::error!("fault: resetting");
        self.reset.reset()
    }

    fn halt_nested(&mut self, _cs: CriticalSection<'_>, iterations: u32) -> Infallible {
        log::error!("fault while handling a fault");

        if iterations != 0 {
            self.reset.reset()
        }
        loop {
            self.delay.delay_ms(self.interval_ms);
        }
    }
}

/// Detects faults raised while a fault is already being handled.
///
/// A fault inside the display driver would otherwise start over rendering through the driver
/// that just failed.
#[derive(Debug)]
pub struct FaultLatch {
    entered: AtomicBool,
}

impl FaultLatch {
    /// Creates an unset latch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entered: AtomicBool::new(false),
        }
    }

    /// Sets the latch, returning `true` if it was not set before.
    pub fn try_enter(&self) -> bool {
        !self.entered.swap(true, Ordering::AcqRel)
    }

    /// Returns whether a fault is being handled.
    pub fn is_set(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

impl Default for FaultLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::any::Any;
    use std::cell::{Cell, RefCell};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Show(StatusCode),
        Wait(u32),
        Reset,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    /// Unwinds out of the fault loop once the display has been used often enough.
    struct StillFrozen;

    /// Unwinds out of the fault loop in place of a real reset.
    struct ResetTriggered;

    struct RecordingDisplay {
        log: Log,
        limit: usize,
    }

    impl FaultDisplay for RecordingDisplay {
        fn show(&mut self, glyph: &Glyph, code: StatusCode) {
            assert_eq!(glyph, &DISTRESS_GLYPH);
            let mut log = self.log.borrow_mut();
            log.push(Event::Show(code));
            let shown = log.iter().filter(|e| matches!(e, Event::Show(_))).count();
            drop(log);
            if shown >= self.limit {
                std::panic::panic_any(StillFrozen);
            }
        }
    }

    struct RecordingDelay {
        log: Log,
        limit: usize,
    }

    impl RecordingDelay {
        fn record(&mut self, ms: u32) {
            let mut log = self.log.borrow_mut();
            log.push(Event::Wait(ms));
            let waited = log.iter().filter(|e| matches!(e, Event::Wait(_))).count();
            drop(log);
            if waited >= self.limit {
                std::panic::panic_any(StillFrozen);
            }
        }
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.record(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.record(ms);
        }
    }

    struct RecordingReset {
        log: Log,
    }

    impl HardReset for RecordingReset {
        fn reset(&mut self) -> ! {
            self.log.borrow_mut().push(Event::Reset);
            std::panic::panic_any(ResetTriggered);
        }
    }

    /// Runs a fault through recording collaborators.
    ///
    /// Returns the recorded events, the payload that ended the fault, and whether code after the
    /// fault call ran.
    #[allow(unreachable_code)]
    fn run_fault(
        enter: impl FnOnce(&mut FaultController<RecordingDisplay, RecordingDelay, RecordingReset>),
    ) -> (Vec<Event>, Box<dyn Any + Send>, bool) {
        let log = Log::default();
        let continued = Cell::new(false);
        let mut controller = FaultController::new(
            RecordingDisplay {
                log: log.clone(),
                limit: 25,
            },
            RecordingDelay {
                log: log.clone(),
                limit: 100,
            },
            RecordingReset { log: log.clone() },
        )
        .with_interval(500);

        let payload = catch_unwind(AssertUnwindSafe(|| {
            enter(&mut controller);
            continued.set(true);
        }))
        .unwrap_err();

        let events = log.borrow().clone();
        (events, payload, continued.get())
    }

    #[test]
    fn without_timeout_shows_forever() {
        let (events, payload, continued) =
            run_fault(|controller| controller.panic_with_timeout(20u8, 0));

        assert!(payload.is::<StillFrozen>());
        assert!(!continued);
        assert!(!events.contains(&Event::Reset));

        let shows: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::Show(_)))
            .collect();
        assert_eq!(shows.len(), 25);
        assert!(shows
            .iter()
            .all(|e| **e == Event::Show(StatusCode::OUT_OF_MEMORY)));
    }

    #[test]
    #[serial]
    fn global_timeout_resets_after_budget() {
        crate::set_panic_timeout(3);
        let (events, payload, continued) = run_fault(|controller| controller.panic(7u8));
        crate::set_panic_timeout(crate::DEFAULT_PANIC_TIMEOUT);

        assert!(payload.is::<ResetTriggered>());
        assert!(!continued);
        let code = StatusCode::new(7);
        assert_eq!(
            events,
            [
                Event::Show(code),
                Event::Wait(500),
                Event::Show(code),
                Event::Wait(500),
                Event::Show(code),
                Event::Wait(500),
                Event::Reset,
            ]
        );
    }

    #[test]
    fn explicit_timeout_overrides_global() {
        let (events, payload, _) =
            run_fault(|controller| controller.panic_with_timeout(StatusCode::HEAP_ERROR, 1));

        assert!(payload.is::<ResetTriggered>());
        assert_eq!(
            events,
            [
                Event::Show(StatusCode::HEAP_ERROR),
                Event::Wait(500),
                Event::Reset
            ]
        );
    }

    #[test]
    #[serial]
    fn timeout_setting() {
        assert_eq!(crate::panic_timeout(), crate::DEFAULT_PANIC_TIMEOUT);
        crate::set_panic_timeout(4);
        assert_eq!(crate::panic_timeout(), 4);
        crate::set_panic_timeout(crate::DEFAULT_PANIC_TIMEOUT);
    }

    #[test]
    fn first_latched_fault_shows_glyph() {
        let latch = FaultLatch::new();
        let (events, payload, continued) = run_fault(|controller| {
            controller.panic_latched(&latch, StatusCode::NULL_DEREFERENCE, 1)
        });

        assert!(payload.is::<ResetTriggered>());
        assert!(!continued);
        assert!(latch.is_set());
        assert_eq!(
            events,
            [
                Event::Show(StatusCode::NULL_DEREFERENCE),
                Event::Wait(500),
                Event::Reset
            ]
        );
    }

    #[test]
    fn nested_fault_with_budget_resets_without_showing() {
        let latch = FaultLatch::new();
        assert!(latch.try_enter());

        let (events, payload, continued) =
            run_fault(|controller| controller.panic_latched(&latch, 30u8, 2));

        assert!(payload.is::<ResetTriggered>());
        assert!(!continued);
        assert_eq!(events, [Event::Reset]);
    }

    #[test]
    fn nested_fault_without_budget_halts_without_showing() {
        let latch = FaultLatch::new();
        assert!(latch.try_enter());

        let (events, payload, continued) =
            run_fault(|controller| controller.panic_latched(&latch, 30u8, 0));

        assert!(payload.is::<StillFrozen>());
        assert!(!continued);
        assert_eq!(events.len(), 100);
        assert!(events.iter().all(|e| *e == Event::Wait(500)));
    }

    #[test]
    fn console_rows() {
        let rows: Vec<_> = (0..GLYPH_SIZE)
            .map(|y| render_row(&DISTRESS_GLYPH, y))
            .collect();
        assert_eq!(rows, [".#.#.", ".....", ".....", ".###.", "#...#"]);
    }

    #[test]
    fn latch_enters_once() {
        let latch = FaultLatch::new();
        assert!(!latch.is_set());
        assert!(latch.try_enter());
        assert!(!latch.try_enter());
        assert!(latch.is_set());
    }
}
