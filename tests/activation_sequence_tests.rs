//! Unit tests for the activation sequencer.
//!
//! Plan construction is pure, so the exact write order, masks, states and
//! delays can be checked without a device attached.

use std::time::Duration;

use cp210x_gpio::{
    ActivationPlan, BootPins, ChipVariant, Error, GpioPin, LatchWrite, PlanStep,
};

fn pins(reset: u8, bootload: Option<u8>) -> BootPins {
    let reset = GpioPin::new(reset).unwrap();
    let bootload = bootload.map(|n| GpioPin::new(n).unwrap());
    BootPins::new(reset, bootload).unwrap()
}

fn writes(plan: &ActivationPlan) -> Vec<LatchWrite> {
    plan.writes().copied().collect()
}

fn settles(plan: &ActivationPlan) -> Vec<Duration> {
    plan.steps()
        .iter()
        .filter_map(|step| match step {
            PlanStep::Settle(delay) => Some(*delay),
            PlanStep::Write(_) => None,
        })
        .collect()
}

#[test]
fn cp2108_full_sequence_matches_expected_writes_and_delays() {
    // reset = GPIO0, bootload = GPIO1 on a CP2108.
    let plan = ActivationPlan::build(ChipVariant::Cp2108, &pins(0, Some(1)), 0).unwrap();

    let w = writes(&plan);
    assert_eq!(w.len(), 3);
    assert_eq!((w[0].mask, w[0].state), (0x0003, 0x0000));
    assert_eq!((w[1].mask, w[1].state), (0x0001, 0xFFFF));
    assert_eq!((w[2].mask, w[2].state), (0x0002, 0xFFFF));

    let s = settles(&plan);
    assert_eq!(s, vec![Duration::from_millis(5), Duration::from_millis(30)]);

    // Strict ordering: write, settle, write, settle, write.
    assert!(matches!(plan.steps()[0], PlanStep::Write(_)));
    assert!(matches!(plan.steps()[1], PlanStep::Settle(_)));
    assert!(matches!(plan.steps()[2], PlanStep::Write(_)));
    assert!(matches!(plan.steps()[3], PlanStep::Settle(_)));
    assert!(matches!(plan.steps()[4], PlanStep::Write(_)));
}

#[test]
fn cp2105_reset_only_sequence_has_exactly_two_writes() {
    // reset = GPIO0, no bootload pin, SCI interface.
    let plan = ActivationPlan::build(ChipVariant::Cp2105, &pins(0, None), 1).unwrap();

    let w = writes(&plan);
    assert_eq!(w.len(), 2, "a plain reset must emit exactly 2 latch writes");
    assert_eq!((w[0].mask, w[0].state), (0x0001, 0x0000));
    assert_eq!((w[1].mask, w[1].state), (0x0001, 0x00FF));

    assert_eq!(settles(&plan), vec![Duration::from_millis(5)]);
    assert_eq!(plan.interface(), 1);

    // The encoded requests must carry the interface in wIndex.
    for write in plan.writes() {
        assert_eq!(plan.encode(write).index, 1);
    }
}

#[test]
fn cp2102n_sequence_packs_each_step_into_windex() {
    let plan = ActivationPlan::build(ChipVariant::Cp2102n, &pins(0, Some(1)), 0).unwrap();
    let requests: Vec<_> = plan.writes().map(|w| plan.encode(w)).collect();

    assert_eq!(requests[0].index, 0x0003, "assert: state 0x00, mask 0x03");
    assert_eq!(requests[1].index, 0xFF01, "release reset: state 0xFF, mask 0x01");
    assert_eq!(requests[2].index, 0xFF02, "release bootload: state 0xFF, mask 0x02");
    for req in &requests {
        assert!(req.data.is_empty());
    }
}

#[test]
fn assert_step_ors_both_single_bit_masks_and_drives_low() {
    for variant in [ChipVariant::Cp2105, ChipVariant::Cp2108] {
        let max = match variant {
            ChipVariant::Cp2108 => 15,
            _ => 7,
        };
        for reset in 0..=max {
            for bootload in 0..=max {
                if reset == bootload {
                    continue;
                }
                let plan =
                    ActivationPlan::build(variant, &pins(reset, Some(bootload)), 0).unwrap();
                let first = writes(&plan)[0];
                assert_eq!(first.mask, (1u16 << reset) | (1u16 << bootload));
                assert_eq!(first.state, 0x0000);
            }
        }
    }
}

#[test]
fn release_reset_never_touches_the_bootload_bit() {
    for variant in [
        ChipVariant::Cp2102n,
        ChipVariant::Cp2105,
        ChipVariant::Cp2108,
    ] {
        let plan = ActivationPlan::build(variant, &pins(3, Some(5)), 0).unwrap();
        let release_reset = writes(&plan)[1];
        assert_eq!(release_reset.mask & (1 << 5), 0);
        assert_eq!(release_reset.mask, 1 << 3);
    }
}

#[test]
fn hold_delays_meet_minimum_pulse_and_sampling_windows() {
    let plan = ActivationPlan::build(ChipVariant::Cp2108, &pins(0, Some(1)), 0).unwrap();
    let s = settles(&plan);
    assert!(s[0] >= Duration::from_millis(5), "reset pulse width");
    assert!(s[1] >= Duration::from_millis(30), "boot-ROM sampling window");
}

#[test]
fn colliding_pins_are_rejected_before_any_plan_exists() {
    let pin = GpioPin::new(4).unwrap();
    match BootPins::new(pin, Some(pin)) {
        Err(Error::PinConflict { pin: 4 }) => {}
        other => panic!("expected PinConflict, got {other:?}"),
    }
}

#[test]
fn pins_beyond_the_byte_latch_are_rejected_for_8bit_variants() {
    for variant in [ChipVariant::Cp2102n, ChipVariant::Cp2105] {
        match ActivationPlan::build(variant, &pins(8, None), 0) {
            Err(Error::PinOutOfRange { pin: 8, .. }) => {}
            other => panic!("{variant}: expected PinOutOfRange, got {other:?}"),
        }
        // Also when only the bootload pin overflows.
        match ActivationPlan::build(variant, &pins(0, Some(9)), 0) {
            Err(Error::PinOutOfRange { pin: 9, .. }) => {}
            other => panic!("{variant}: expected PinOutOfRange, got {other:?}"),
        }
    }
    // The same pins are fine on the 16-bit CP2108.
    assert!(ActivationPlan::build(ChipVariant::Cp2108, &pins(8, Some(9)), 0).is_ok());
}

#[test]
fn pin_numbers_above_15_are_rejected_at_construction() {
    assert!(GpioPin::new(15).is_ok());
    match GpioPin::new(16) {
        Err(Error::PinOutOfRange { pin: 16, .. }) => {}
        other => panic!("expected PinOutOfRange, got {other:?}"),
    }
}

#[test]
fn non_cp2105_plans_force_interface_zero() {
    for variant in [ChipVariant::Cp2102n, ChipVariant::Cp2108] {
        let plan = ActivationPlan::build(variant, &pins(0, None), 1).unwrap();
        assert_eq!(plan.interface(), 0, "{variant} must ignore the interface index");
    }
}

#[test]
fn write_count_tracks_presence_of_the_bootload_pin() {
    let with = ActivationPlan::build(ChipVariant::Cp2108, &pins(2, Some(7)), 0).unwrap();
    let without = ActivationPlan::build(ChipVariant::Cp2108, &pins(2, None), 0).unwrap();
    assert_eq!(with.write_count(), 3);
    assert_eq!(without.write_count(), 2);
}
