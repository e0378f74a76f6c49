use criterion::{black_box, criterion_group, criterion_main, Criterion};
use web3peek_types::{units, Address, Block, U256};

fn bench_u256_conversion(c: &mut Criterion) {
    let val = U256::from(0x1234567890abcdef_1122334455667788u128);

    c.bench_function("u256_to_decimal", |bencher| bencher.iter(|| black_box(val).to_string()));
    c.bench_function("u256_to_quantity", |bencher| bencher.iter(|| black_box(val).to_quantity()));
    c.bench_function("u256_from_quantity", |bencher| {
        let s = val.to_quantity();
        bencher.iter(|| U256::from_quantity(black_box(&s)))
    });
    c.bench_function("format_ether", |bencher| {
        bencher.iter(|| units::format_ether(black_box(&val)))
    });
}

fn bench_address(c: &mut Criterion) {
    let s = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1";

    c.bench_function("address_parse", |bencher| bencher.iter(|| black_box(s).parse::<Address>()));
}

fn bench_block_decode(c: &mut Criterion) {
    let tx_hashes: Vec<String> = (0..200u32)
        .map(|i| format!("0x{:064x}", i))
        .collect();
    let json = serde_json::json!({
        "number": "0x10",
        "hash": format!("0x{:064x}", 16),
        "parentHash": format!("0x{:064x}", 15),
        "nonce": "0x0000000000000000",
        "sha3Uncles": format!("0x{:064x}", 0),
        "logsBloom": "0x00",
        "transactionsRoot": format!("0x{:064x}", 1),
        "stateRoot": format!("0x{:064x}", 2),
        "receiptsRoot": format!("0x{:064x}", 3),
        "miner": format!("0x{:040x}", 0),
        "difficulty": "0x0",
        "extraData": "0x",
        "size": "0x3e8",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "timestamp": "0x5f5e1000",
        "transactions": tx_hashes,
        "uncles": []
    })
    .to_string();

    c.bench_function("block_decode_200_hashes", |bencher| {
        bencher.iter(|| serde_json::from_str::<Block>(black_box(&json)))
    });
}

criterion_group!(benches, bench_u256_conversion, bench_address, bench_block_decode);
criterion_main!(benches);
