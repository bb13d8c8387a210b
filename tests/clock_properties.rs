use randclock::dsp::{
    clock::{ClockState, VoiceClock},
    density::{map_master_density, map_voice_multiplier},
};

const SAMPLE_RATE: f32 = 1_000.0;
const DT: f32 = 1.0 / SAMPLE_RATE;

/// Run until `pulses` pulses have started, returning the sample index of
/// every pulse start and the committed gate length of each.
fn collect_pulses(clock: &mut VoiceClock, pulses: usize) -> (Vec<u64>, Vec<f32>) {
    let mut starts = Vec::with_capacity(pulses);
    let mut lengths = Vec::with_capacity(pulses);
    let mut last_count = clock.pulse_count();
    let mut sample = 0u64;

    while starts.len() < pulses {
        clock.process(DT);
        if clock.pulse_count() != last_count {
            assert_eq!(clock.pulse_count(), last_count + 1, "more than one pulse in a step");
            last_count = clock.pulse_count();
            starts.push(sample);
            lengths.push(clock.current_gate_len());
        }
        sample += 1;
        assert!(sample < 100_000_000, "clock stalled");
    }

    (starts, lengths)
}

#[test]
fn mean_interval_converges_to_inverse_density() {
    let density = 10.0;
    let mut clock = VoiceClock::new(2024);
    clock.set_density(density);
    clock.set_gate_len(0.25);

    let (starts, _) = collect_pulses(&mut clock, 20_000);
    let span = (starts[starts.len() - 1] - starts[0]) as f64 * DT as f64;
    let mean_interval = span / (starts.len() - 1) as f64;
    let expected = 1.0 / density as f64;

    assert!(
        (mean_interval - expected).abs() / expected < 0.03,
        "mean interval {} vs expected {}",
        mean_interval,
        expected
    );
}

#[test]
fn intervals_look_exponential() {
    // For a Poisson process the interval standard deviation equals the mean
    let density = 5.0;
    let mut clock = VoiceClock::new(99);
    clock.set_density(density);

    let (starts, _) = collect_pulses(&mut clock, 10_000);
    let intervals: Vec<f64> = starts
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64 * DT as f64)
        .collect();
    let n = intervals.len() as f64;
    let mean = intervals.iter().sum::<f64>() / n;
    let var = intervals.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let cv = var.sqrt() / mean;

    assert!((cv - 1.0).abs() < 0.1, "coefficient of variation {}", cv);
}

#[test]
fn observed_edge_rate_matches_density() {
    // 50% gates at 10 Hz: a large share of arrivals land on an open gate,
    // and each one must still reach the output as a rising edge
    let density = 10.0;
    let seconds = 500.0;
    let mut clock = VoiceClock::new(808);
    clock.set_density(density);
    clock.set_gate_len(0.25);

    let mut edges = 0u64;
    let mut last = 0.0;
    for _ in 0..(seconds * SAMPLE_RATE) as usize {
        let level = clock.process(DT);
        if level > 0.0 && last == 0.0 {
            edges += 1;
        }
        last = level;
    }
    if clock.state() == ClockState::Rearming && clock.process(DT) > 0.0 {
        edges += 1;
    }

    assert_eq!(edges, clock.pulse_count());
    let rate = edges as f32 / seconds;
    assert!((rate - density).abs() / density < 0.05, "observed {} Hz", rate);
}

#[test]
fn deterministic_gate_lengths_are_exact() {
    for (control, expected) in [(0.0, 0.01), (0.125, 0.255), (0.25, 0.5), (0.5, 0.99)] {
        let mut a = VoiceClock::new(1);
        let mut b = VoiceClock::new(2);
        for clock in [&mut a, &mut b] {
            clock.set_density(40.0);
            clock.set_gate_len(control);
        }

        let (_, lengths_a) = collect_pulses(&mut a, 200);
        let (_, lengths_b) = collect_pulses(&mut b, 200);
        for len in lengths_a.iter().chain(&lengths_b) {
            assert!(
                (len - expected).abs() < 1e-5,
                "control {} gave {} (expected {})",
                control,
                len,
                expected
            );
        }
        assert!((a.current_gate_duration() - expected / 40.0).abs() < 1e-6);
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let render = || {
        let mut clock = VoiceClock::new(555);
        clock.set_density(25.0);
        clock.set_gate_len(0.1);
        (0..50_000).map(|_| clock.process(DT)).collect::<Vec<_>>()
    };
    assert_eq!(render(), render());
}

#[test]
fn stochastic_gate_lengths_favour_extremes() {
    let mut clock = VoiceClock::new(31337);
    clock.set_density(50.0);
    clock.set_gate_len(1.0);

    let (_, lengths) = collect_pulses(&mut clock, 12_000);
    let mut bins = [0usize; 10];
    for &len in &lengths {
        assert!((0.0..=1.0).contains(&len), "gate length {} out of range", len);
        bins[((len * 10.0) as usize).min(9)] += 1;
    }

    let edges = bins[0] + bins[9];
    let centre = bins[4] + bins[5];
    assert!(edges > 10 * centre.max(1), "bins {:?}", bins);
    assert!(bins[0] > bins[4] && bins[9] > bins[5], "bins {:?}", bins);
}

#[test]
fn stochastic_just_above_split_is_near_uniform() {
    let mut clock = VoiceClock::new(4242);
    clock.set_density(50.0);
    clock.set_gate_len(0.51);

    let (_, lengths) = collect_pulses(&mut clock, 10_000);
    let mut bins = [0usize; 4];
    for &len in &lengths {
        bins[((len * 4.0) as usize).min(3)] += 1;
    }
    // bias 0.02: each quarter gets close to 2500
    for &count in &bins {
        assert!((2000..3000).contains(&count), "bins {:?}", bins);
    }
}

#[test]
fn zero_density_stays_silent() {
    let mut clock = VoiceClock::new(8);
    clock.set_density(0.0);
    for control in [0.0, 0.5, 1.0] {
        clock.set_gate_len(control);
        for _ in 0..200_000 {
            assert_eq!(clock.process(DT), 0.0);
        }
    }
    assert_eq!(clock.state(), ClockState::Waiting);
    assert_eq!(clock.pulse_count(), 0);
}

#[test]
fn density_drop_to_zero_closes_the_gate() {
    let mut clock = VoiceClock::new(12);
    clock.set_density(100.0);
    clock.set_gate_len(0.5);
    for _ in 0..1_000 {
        clock.process(DT);
    }

    clock.set_density(0.0);
    let count = clock.pulse_count();
    // The open gate (at most ~10 ms) runs out, nothing new starts
    for _ in 0..100 {
        clock.process(DT);
    }
    assert_eq!(clock.pulse_count(), count);
    for _ in 0..10_000 {
        assert_eq!(clock.process(DT), 0.0);
    }
}

#[test]
fn extreme_inputs_never_produce_nan() {
    let controls = [0.0, 1e-6, 0.25, 0.5, 0.500001, 0.75, 1.0];
    for (i, &master) in controls.iter().enumerate() {
        for &mult in &controls {
            for &gate in &controls {
                let mut clock = VoiceClock::new(i as u64);
                clock.set_density(map_master_density(master) * map_voice_multiplier(mult));
                clock.set_gate_len(gate);
                for _ in 0..2_000 {
                    let level = clock.process(1.0 / 48_000.0);
                    assert!(level.is_finite() && (0.0..=1.0).contains(&level));
                }
                assert!(clock.current_gate_len().is_finite());
                assert!(clock.current_gate_duration().is_finite());
            }
        }
    }
}

#[test]
fn accumulated_skip_fires_at_most_once() {
    let mut clock = VoiceClock::new(77);
    clock.set_density(200.0);
    clock.set_gate_len(0.0);

    for skip in [0.5_f32, 5.0, 60.0] {
        let before = clock.pulse_count();
        clock.process(skip);
        assert!(clock.pulse_count() - before <= 1, "skip of {}s replayed pulses", skip);

        // Normal stepping resumes at the configured rate
        let before = clock.pulse_count();
        for _ in 0..1_000 {
            clock.process(DT);
        }
        let fired = clock.pulse_count() - before;
        assert!(fired > 50, "only {} pulses after resuming", fired);
    }
}
