use std::time::{Duration, SystemTime};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tracekit::testing::trace::TestTracer;
use tracekit::trace::noop::NoopTracer;
use tracekit::trace::ExceptionInfo;
use tracekit_web::{CompletionPayload, ControllerInstrumentation, RequestContext};

fn routed_ok() -> CompletionPayload {
    CompletionPayload::new()
        .with_controller("UsersController")
        .with_action("show")
        .with_status(200)
}

fn criterion_benchmark(c: &mut Criterion) {
    request_cycle_benchmark_group(c);
}

fn request_cycle_benchmark_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_cycle");
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let finish = start + Duration::from_millis(250);

    group.bench_function("noop_tracer_ok", |b| {
        let instr = ControllerInstrumentation::builder(NoopTracer::new()).build();
        let payload = routed_ok();
        b.iter(|| {
            let cx = RequestContext::new();
            instr.on_request_start(&cx);
            instr.on_request_complete(&cx, start, finish, &payload);
        })
    });

    group.bench_function("noop_tracer_exception", |b| {
        let instr = ControllerInstrumentation::builder(NoopTracer::new()).build();
        let payload = CompletionPayload::new()
            .with_controller("UsersController")
            .with_action("show")
            .with_exception(ExceptionInfo::new("RuntimeError", "boom"));
        b.iter(|| {
            let cx = RequestContext::new();
            instr.on_request_start(&cx);
            instr.on_request_complete(&cx, start, finish, &payload);
        })
    });

    group.bench_function("recording_tracer_ok", |b| {
        let tracer = TestTracer::new();
        let instr = ControllerInstrumentation::builder(tracer.clone()).build();
        let payload = routed_ok();
        b.iter(|| {
            let cx = RequestContext::new();
            instr.on_request_start(&cx);
            instr.on_request_complete(&cx, start, finish, &payload);
            tracer.reset();
        })
    });

    group.bench_function("build_payload", |b| {
        b.iter(|| {
            let _payload = CompletionPayload::new()
                .with_controller(black_box("UsersController"))
                .with_action("show")
                .with_status(200);
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);

criterion_main!(benches);
