use std::sync::Arc;

use firesafe::api::ApiClient;
use firesafe::config::AppConfig;
use firesafe::error::AppError;
use firesafe::reports;
use firesafe::session::SessionContext;
use firesafe::telemetry;
use firesafe::workflows::booking::{
    BookingDirectory, BookingId, BookingScope, BookingView, BuildingId, ScheduleForm,
};
use firesafe::workflows::buildings::BuildingForm;
use firesafe::workflows::inspection::InspectionSubmissionService;
use tracing::info;

use crate::cli::{BookingListArgs, BuildingListArgs, InspectArgs, RegisterArgs, ScheduleArgs};
use crate::infra::{prepare_draft, render_bookings, render_buildings, write_draft};

/// Loaded configuration plus the client every command talks through.
pub(crate) struct Session {
    config: AppConfig,
    client: Arc<ApiClient>,
}

impl Session {
    pub(crate) fn bootstrap() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;

        let context = config.session.context();
        let client = Arc::new(ApiClient::new(&config.api, context)?);
        info!(
            environment = ?config.environment,
            api = %config.api.base_url,
            role = %client.session().role(),
            "firesafe client ready"
        );

        Ok(Self { config, client })
    }

    fn context(&self) -> &SessionContext {
        self.client.session()
    }

    fn scope(&self, everyone: bool) -> BookingScope {
        if everyone {
            BookingScope::All
        } else {
            BookingScope::User(self.context().scope_user_id())
        }
    }
}

pub(crate) async fn list_buildings(
    session: &Session,
    args: BuildingListArgs,
) -> Result<(), AppError> {
    let owner = args.mine.then(|| session.context().owner_id());
    let buildings = session.client.buildings(owner).await?;
    print!("{}", render_buildings(&buildings));
    Ok(())
}

pub(crate) async fn register_building(
    session: &Session,
    args: RegisterArgs,
) -> Result<(), AppError> {
    let form = BuildingForm {
        name: args.name,
        address: args.address,
        building_type: args.building_type,
        floors: args.floors,
        units: args.units,
        construction_date: args.construction_date,
        lat: args.lat,
        lng: args.lng,
    };

    let registration = form.registration()?;
    let reply = session.client.register_building(&registration).await?;
    let message = reply
        .message
        .clone()
        .unwrap_or_else(|| "Building registered.".to_string());
    reply.into_result()?;

    info!(name = %registration.name, "building registered");
    println!("{message}");
    Ok(())
}

pub(crate) async fn list_bookings(
    session: &Session,
    args: BookingListArgs,
) -> Result<(), AppError> {
    let bookings = session.client.bookings(session.scope(args.everyone)).await?;
    let view = BookingView::from(args.view);
    let selected = view.select(session.context(), &bookings);

    print!("{}", render_bookings(view.label(), &selected));

    if let Some(path) = args.csv {
        let file = std::fs::File::create(&path)?;
        reports::write_bookings(file, &selected)?;
        info!(path = %path.display(), rows = selected.len(), "bookings exported");
    }
    Ok(())
}

pub(crate) async fn schedule_booking(
    session: &Session,
    args: ScheduleArgs,
) -> Result<(), AppError> {
    let form = ScheduleForm {
        building_id: args.building.map(BuildingId),
        date: args.date,
        time: args.time,
        kind: args.kind,
    };

    let request = form.request()?;
    session.client.create_booking(&request).await?;

    println!(
        "Scheduled a {} visit for building {} on {}.",
        request.kind.label(),
        request.building_id.0,
        request.appointment.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub(crate) async fn submit_inspection(
    session: &Session,
    args: InspectArgs,
) -> Result<(), AppError> {
    let booking_id = BookingId(args.booking);
    let mut bookings = session.client.bookings(session.scope(args.everyone)).await?;
    let booking = bookings
        .iter_mut()
        .find(|booking| booking.id == booking_id)
        .ok_or(AppError::UnknownBooking(booking_id))?;

    let mut draft = prepare_draft(&args.draft, &args.images, booking).await?;

    let service = InspectionSubmissionService::with_redirect_delay(
        session.client.clone(),
        session.config.submission.redirect_delay(),
    );
    let receipt = service.submit(booking, &mut draft).await?;

    write_draft(&args.draft, &draft).await?;
    println!("{}", receipt.message());

    tokio::time::sleep(receipt.redirect_after).await;
    let pending = BookingView::Pending.select(session.context(), &bookings);
    print!("{}", render_bookings(BookingView::Pending.label(), &pending));
    Ok(())
}
