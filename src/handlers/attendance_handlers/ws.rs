use actix_web::{web, HttpRequest, HttpResponse};

use crate::realtime::{self, Hub, Topic};

/// GET /ws/schedule: status and schedule changes for participant and admin lists.
pub async fn schedule_ws(
    req: HttpRequest,
    body: web::Payload,
    hub: web::Data<Hub>,
) -> Result<HttpResponse, actix_web::Error> {
    realtime::serve(&req, body, &hub, Topic::Schedule)
}
