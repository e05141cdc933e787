//! Shadow Tag entry point

use paradox_arcade::app::ShadowTag;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    paradox_arcade::platform::run::<ShadowTag>()
}
