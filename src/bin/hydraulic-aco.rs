use hydraulic_aco::driver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    driver::run()
}
