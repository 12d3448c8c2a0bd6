#![no_main]

use libfuzzer_sys::fuzz_target;

use pagefx_core::{EffectOptions, PageDescription, Simulation};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(page) = PageDescription::from_json(json) else {
        return;
    };

    // Any page that validates must build and run without panicking
    let (doc, _layout) = page.build();
    let mut sim = Simulation::new(doc, EffectOptions::default(), 16.0);
    sim.reveal_all();
    let _ = sim.run_for(2_500.0);
    let _ = sim.page().snapshot();
});
