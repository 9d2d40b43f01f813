//! Activation sequencer: the ordered latch writes and delays that reset a
//! target and optionally hold its active-low bootloader-activation pin
//! through the boot-ROM sampling window.
//!
//! The plan is computed once from (variant, pins, interface) and is immutable
//! afterwards; [`Cp210x::execute`](crate::Cp210x::execute) consumes it. Keeping
//! plan construction pure means the exact write order, masks, states and
//! delays are testable without a device attached.

use std::time::Duration;

use crate::consts::timing;
use crate::error::Result;
use crate::gpio::BootPins;
use crate::latch::{encode_write, ControlRequest};
use crate::variant::ChipVariant;

/// One masked latch write within the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatchWrite {
    /// Bits the device may change in this write.
    pub mask: u16,
    /// New level for masked bits, at the variant's latch width.
    pub state: u16,
    /// What this write accomplishes, used in logs and error context.
    pub step: &'static str,
}

/// A single step of the activation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStep {
    /// Issue one blocking latch write.
    Write(LatchWrite),
    /// Suspend the calling thread; no transfer is issued.
    Settle(Duration),
}

/// The full ordered sequence of latch writes and delays for one activation.
#[derive(Debug, Clone)]
pub struct ActivationPlan {
    variant: ChipVariant,
    interface: u8,
    steps: Vec<PlanStep>,
}

impl ActivationPlan {
    /// Builds the plan for the given variant and pins.
    ///
    /// Pin numbers are bounded against the variant's latch width here,
    /// before any transfer can be issued. The sequence is:
    ///
    /// 1. assert reset (and bootload, if present) low in a single write;
    /// 2. hold 5 ms (minimum reset pulse width);
    /// 3. release reset high — the bootload bit is excluded from the mask,
    ///    so that pin stays asserted;
    /// 4. with a bootload pin: hold 30 ms, then release it high.
    ///
    /// Without a bootload pin the plan ends at step 3: a plain target reset.
    pub fn build(variant: ChipVariant, pins: &BootPins, interface: u8) -> Result<Self> {
        variant.check_pin(pins.reset())?;
        if let Some(bootload_pin) = pins.bootload() {
            variant.check_pin(bootload_pin)?;
        }

        let all_high = variant.latch_width().full_mask();
        let mut steps = vec![
            PlanStep::Write(LatchWrite {
                mask: pins.combined_mask(),
                state: 0x0000,
                step: "assert reset",
            }),
            PlanStep::Settle(timing::RESET_HOLD),
            PlanStep::Write(LatchWrite {
                mask: pins.reset().mask(),
                state: all_high,
                step: "release reset",
            }),
        ];
        if let Some(bootload_pin) = pins.bootload() {
            steps.push(PlanStep::Settle(timing::BOOT_SAMPLE_WINDOW));
            steps.push(PlanStep::Write(LatchWrite {
                mask: bootload_pin.mask(),
                state: all_high,
                step: "release bootloader activation",
            }));
        }

        Ok(ActivationPlan {
            variant,
            interface: variant.effective_interface(interface),
            steps,
        })
    }

    /// The variant this plan was built for.
    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    /// The interface number the writes will address.
    pub fn interface(&self) -> u8 {
        self.interface
    }

    /// The ordered steps of the plan.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Iterates the latch writes in order, skipping delays.
    pub fn writes(&self) -> impl Iterator<Item = &LatchWrite> {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Write(write) => Some(write),
            PlanStep::Settle(_) => None,
        })
    }

    /// Number of latch writes in the plan: 2 for a plain reset, 3 with a
    /// bootloader-activation pin.
    pub fn write_count(&self) -> usize {
        self.writes().count()
    }

    /// Encodes one of the plan's writes into its control-transfer fields.
    pub fn encode(&self, write: &LatchWrite) -> ControlRequest {
        encode_write(self.variant, write.mask, write.state, self.interface)
    }
}
