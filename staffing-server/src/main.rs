fn main() {
    staffing_server::server::run();
}
