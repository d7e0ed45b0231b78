#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use blogdesk::application::carousel::CarouselController;
use blogdesk::presentation::views::CarouselTemplate;

use crate::args::CarouselArgs;
use crate::context::{CliError, Ctx, check_notice};
use crate::print::{print_html, print_json};

pub async fn handle(ctx: &Ctx, args: CarouselArgs) -> Result<(), CliError> {
    let mut carousel = CarouselController::new(
        Arc::clone(&ctx.api),
        ctx.session.clone(),
        ctx.settings.listing.carousel_size.get(),
    );
    carousel.load().await;
    check_notice(carousel.ui())?;

    let view = carousel.go_to(args.slide);
    if args.html {
        print_html(&CarouselTemplate { view: &view })
    } else {
        print_json(&view)
    }
}
