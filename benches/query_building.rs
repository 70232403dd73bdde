//! Benchmarks for help url parsing and REST url building.
//!
//! These run once per click, search and page change.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roundup_classhelper::helpurl::{HelpLink, HelpUrlDescriptor};
use roundup_classhelper::popup::FormData;
use roundup_classhelper::rest::urls;
use roundup_classhelper::search_spec::SearchSpec;

const BASE: &str = "http://localhost:8080/demo";

fn link() -> HelpLink {
    HelpLink {
        helpurl: Some(
            "user?@startwith=0&@pagesize=10&@template=help&properties=username,realname,roles&property=nosy&form=itemSynopsis&@sort=username&type=checkbox"
                .to_string(),
        ),
        width: Some("600".to_string()),
        height: Some("500".to_string()),
        onclick: Some("javascript:help_window()".to_string()),
    }
}

fn bench_parse_helpurl(c: &mut Criterion) {
    let link = link();
    c.bench_function("parse_helpurl", |b| {
        b.iter(|| HelpUrlDescriptor::parse(black_box(&link)))
    });
}

fn bench_parse_search_spec(c: &mut Criterion) {
    c.bench_function("parse_search_spec", |b| {
        b.iter(|| SearchSpec::parse(black_box("username,realname,roles[]+name,status[]-order")))
    });
}

fn bench_listing_url(c: &mut Criterion) {
    let descriptor = HelpUrlDescriptor::parse(&link()).unwrap();
    c.bench_function("listing_url", |b| {
        b.iter(|| urls::listing_url(black_box(BASE), black_box(&descriptor)))
    });
}

fn bench_search_url(c: &mut Criterion) {
    let descriptor = HelpUrlDescriptor::parse(&link()).unwrap();
    let mut form = FormData::new();
    form.push("username", "adm");
    form.push("realname", "");
    form.push("roles", "admin");

    c.bench_function("search_url", |b| {
        b.iter(|| urls::search_url(black_box(BASE), black_box(&descriptor), black_box(&form)))
    });
}

criterion_group!(
    benches,
    bench_parse_helpurl,
    bench_parse_search_spec,
    bench_listing_url,
    bench_search_url
);
criterion_main!(benches);
