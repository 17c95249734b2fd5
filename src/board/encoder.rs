//! Quadrature edge watcher.
//!
//! Runs as its own task so no transition is missed between control-loop
//! polls. It only publishes the absolute position; the control loop reads
//! it once per iteration and owns the delta bookkeeping.

use core::cell::Cell;

use embassy_futures::select::select;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use mediaboard::input::encoder::QuadratureDecoder;

static POSITION: Mutex<CriticalSectionRawMutex, Cell<i32>> = Mutex::new(Cell::new(0));

/// Latest absolute detent count.
pub fn position() -> i32 {
    POSITION.lock(|p| p.get())
}

#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) -> ! {
    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        let position = decoder.update(a.is_high(), b.is_high());
        POSITION.lock(|p| p.set(position));
    }
}
