// NO_PRINTLN: each bare print macro below is denied

fn print_request_body(body: &str) {
    println!("method: {}", body);
}

fn print_unexpected_error(detail: &str) {
    eprintln!("Unexpected error: {}", detail);
}

fn dump_token() {
    let token = "55cc9ce5";
    dbg!(token);
}

// Allowed: routed through tracing
fn log_context(request_id: &str) {
    tracing::info!(request_id = %request_id, "{{\"code\":200}}");
}

fn main() {
    print_request_body("{}");
    print_unexpected_error("boom");
    dump_token();
    log_context("req-1");
}
