//! Four loops showing the configuration knobs.
//!
//! ```sh
//! cargo run --example demo
//! ```

use std::{thread, time::Duration};

use loop_progress::{Progress, ProgressBuilder};

fn main() -> loop_progress::Result<()> {
    let mut bar = Progress::new(1000)?;
    for _cycle in bar.name("such wow").timed(true) {
        thread::sleep(Duration::from_millis(1));
    }
    bar.finish()?;

    let mut bar = ProgressBuilder::new(1000)
        .name("much amaze")
        .style("/= /")
        .ticks(100)
        .build_stdout()?;
    for _cycle in &mut bar {
        thread::sleep(Duration::from_millis(1));
    }
    bar.finish()?;

    let mut bar = Progress::new(100)?;
    for _cycle in bar.name("biiig").length(100) {
        thread::sleep(Duration::from_millis(10));
    }
    bar.finish()?;

    let mut bar = ProgressBuilder::new(1000)
        .name("numbers?")
        .length(50)
        .ticks(1000)
        .style("|= |")
        .update(5)
        .show_bar(false)
        .timed(true)
        .build_stdout()?;
    for _cycle in &mut bar {
        thread::sleep(Duration::from_millis(10));
    }
    bar.finish()
}
