use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

use quickstrike::core::UnitIdentity;
use quickstrike::unit::{
    AmmoMount, HeatSinkType, HeatSinks, Location, MekData, SourceUnit, UnitKind, WeaponMount,
};
use quickstrike::{ConverterConfig, Converter, EquipmentCatalog};

fn load_catalog() -> EquipmentCatalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/equipment.toml");
    let mut catalog = EquipmentCatalog::new();
    catalog.load_file(&path).unwrap();
    catalog
}

fn roster(count: usize) -> Vec<SourceUnit> {
    let loadouts: [&[&str]; 4] = [
        &["medium-laser", "medium-laser", "small-laser"],
        &["ppc", "ppc", "medium-laser"],
        &["lrm-20", "lrm-20", "medium-laser"],
        &["ac-20", "medium-laser", "medium-laser", "small-laser"],
    ];
    (0..count)
        .map(|i| {
            let mut unit = SourceUnit::new(
                UnitIdentity::new(format!("Mek {}", i), "BN-1"),
                UnitKind::Mek(MekData::default()),
                20.0 + (i % 17) as f64 * 5.0,
            )
            .with_movement(3 + (i % 5) as u32, (i % 3) as u32)
            .with_heat_sinks(HeatSinks::new(10 + (i % 8) as u32, HeatSinkType::Single))
            .with_armor(Location::CenterTorso, 60 + (i % 200) as u32, 0, 16)
            .with_ammo(AmmoMount::new("lrm", 20, 12))
            .with_ammo(AmmoMount::new("ac", 20, 10));
            for id in loadouts[i % loadouts.len()] {
                unit = unit.with_weapon(WeaponMount::new(*id, Location::RightTorso));
            }
            unit
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let catalog = load_catalog();
    let units = roster(1);
    let converter = Converter::new(&catalog);

    c.bench_function("convert_single", |b| {
        b.iter(|| converter.convert(black_box(&units[0])))
    });
}

fn bench_batch(c: &mut Criterion) {
    let catalog = load_catalog();
    let units = roster(1000);
    let mut group = c.benchmark_group("convert_batch");

    let serial = Converter::with_config(
        &catalog,
        ConverterConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        },
    );
    group.bench_function("serial_1000", |b| {
        b.iter(|| serial.convert_batch(black_box(&units)))
    });

    let parallel = Converter::new(&catalog);
    group.bench_function("parallel_1000", |b| {
        b.iter(|| parallel.convert_batch(black_box(&units)))
    });

    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
