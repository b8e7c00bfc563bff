//! Reverse-anneal schedule sweep
//!
//! Prints the waveforms for a range of target s-values, in the
//! `[[t, s], ...]` form an annealing client accepts.

use qanneal_schedule::prelude::*;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              QAnneal Reverse-Anneal Schedule Sweep           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let s_targets = [1.0, 0.8, 0.6, 0.45, 0.3];
    let hold_time = 10.0;

    println!("┌──────────┬────────┬──────────┬──────────────────────────────────────────────┐");
    println!("│ s_target │ Points │ Total us │ Schedule                                     │");
    println!("├──────────┼────────┼──────────┼──────────────────────────────────────────────┤");

    for &s_target in &s_targets {
        let params = ReverseAnnealParams::default()
            .with_s_target(s_target)
            .with_hold_time(hold_time);

        match params.build().and_then(|s| Ok((s.to_json()?, s))) {
            Ok((json, schedule)) => println!(
                "│ {:8.2} │ {:6} │ {:8.4} │ {:<44} │",
                s_target,
                schedule.len(),
                schedule.total_time(),
                json
            ),
            Err(e) => println!("│ {:8.2} │ error: {:<63} │", s_target, e),
        }
    }

    println!("└──────────┴────────┴──────────┴──────────────────────────────────────────────┘\n");

    // Slope-defined return ramp
    let fast_return = ReverseAnnealParams::default()
        .with_s_target(0.45)
        .with_ramp_up_slope(0.2);
    match fast_return.build() {
        Ok(schedule) => println!("{}\n  -> {}", fast_return, schedule),
        Err(e) => println!("{}: {}", fast_return, e),
    }

    // Rejected parameters
    for bad in [
        ReverseAnnealParams::default().with_s_target(1.1),
        ReverseAnnealParams::default().with_ramp_back_slope(0.3),
        ReverseAnnealParams::default().with_hold_time(-1.0),
    ] {
        if let Err(e) = bad.validate() {
            println!("✗ {}", e);
        }
    }
}
