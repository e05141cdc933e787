//! Time Runners: Paradox Shift entry point

use paradox_arcade::app::TimeRunners;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    paradox_arcade::platform::run::<TimeRunners>()
}
