#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Knob changes sent from a control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ClockMessage {
    /// Master density knob, 0..1
    SetMasterDensity(f32),
    /// Rate multiplier knob of one voice, 0..1
    SetMultiplier { voice: usize, value: f32 },
    /// Gate length knob of one voice, 0..1
    SetGateLen { voice: usize, value: f32 },
    /// Restart every voice with a fresh startup delay
    Reset,
}

/// Source of [`ClockMessage`]s drained by the audio thread between blocks.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ClockMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ClockMessage> {
    fn pop(&mut self) -> Option<ClockMessage> {
        Consumer::pop(self).ok()
    }
}
