//! Properties that hold for every supported RAM shape.

use memgen_ram::emit::emit;
use memgen_ram::plan::plan;
use memgen_ram::RamConfig;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// A supported RAM: word width in [1, 64], address width in [1, 16].
#[derive(Clone, Debug)]
struct Shape {
    data_width: u32,
    address_width: u32,
    byte_enables: bool,
}

impl Arbitrary for Shape {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            data_width: u32::arbitrary(g) % 64 + 1,
            address_width: u32::arbitrary(g) % 16 + 1,
            byte_enables: bool::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let this = self.clone();
        Box::new(
            (1..self.data_width)
                .rev()
                .take(4)
                .map(move |w| Shape { data_width: w, ..this.clone() }),
        )
    }
}

impl Shape {
    fn config(&self) -> RamConfig {
        RamConfig::new(self.data_width, self.address_width).with_byte_enables(self.byte_enables)
    }
}

#[quickcheck]
fn lane_arithmetic(shape: Shape) -> bool {
    let cfg = RamConfig::new(shape.data_width, shape.address_width).with_byte_enables(true);
    let widths: u32 = cfg.lane_slices().iter().map(|s| s.width()).sum();
    cfg.lane_count() == shape.data_width.div_ceil(8)
        && cfg.is_ragged() == (shape.data_width % 8 != 0)
        && widths == shape.data_width
}

#[quickcheck]
fn lane_slices_ascend_without_overlap(shape: Shape) -> bool {
    let slices = shape.config().lane_slices();
    slices.windows(2).all(|pair| pair[0].high < pair[1].low && pair[0].high + 1 == pair[1].low)
        && slices.first().map(|s| s.low) == Some(0)
        && slices.last().map(|s| s.high) == Some(shape.data_width - 1)
}

#[quickcheck]
fn only_the_top_lane_is_narrow(shape: Shape) -> bool {
    let slices = shape.config().with_byte_enables(true).lane_slices();
    let (last, rest) = match slices.split_last() {
        Some(split) => split,
        None => return false,
    };
    rest.iter().all(|s| s.width() == 8) && (1..=8).contains(&last.width())
}

#[quickcheck]
fn planning_and_emission_are_idempotent(shape: Shape) -> bool {
    let cfg = shape.config();
    let first = plan(&cfg).unwrap();
    let second = plan(&cfg).unwrap();
    let body_a = emit(&cfg, &first).unwrap();
    let body_b = emit(&cfg, &second).unwrap();
    first == second
        && body_a == body_b
        && serde_json::to_string(&body_a).unwrap() == serde_json::to_string(&body_b).unwrap()
}

#[quickcheck]
fn every_body_name_is_declared(shape: Shape) -> bool {
    let unit = memgen_ram::RamGenerator::new(memgen_ram::Dialect::Vhdl, Default::default())
        .build_unit(&shape.config())
        .unwrap();
    unit.undeclared_references().is_empty()
        && unit.duplicate_names().is_empty()
        && memgen_vhdl::render_unit(&unit).is_ok()
}
