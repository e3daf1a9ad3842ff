use crate::{error::Error, registry, util, RecordedCall};
use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use lazy_static::lazy_static;
use std::{
    convert::Infallible,
    net::{SocketAddr, TcpListener},
    sync::{Mutex, PoisonError},
    thread,
};
use tokio::runtime;

lazy_static! {
    static ref SERVER_ADDRESS: Mutex<Option<SocketAddr>> = Mutex::new(None);
}

/// Start the mock server the first time it is needed and return its address.
///
/// The server binds an ephemeral loopback port and lives on its own thread for
/// the rest of the process.
pub(crate) fn start_once() -> Result<SocketAddr, Error> {
    let mut address = SERVER_ADDRESS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(address) = *address {
        return Ok(address);
    }

    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    listener.set_nonblocking(true)?;
    let local_address = listener.local_addr()?;

    let runtime = runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name(String::from("roads-mock-server"))
        .spawn(move || {
            runtime.block_on(async move {
                let builder = match Server::from_tcp(listener) {
                    Ok(builder) => builder,
                    Err(e) => {
                        tracing::error!(error = %e, "roads-mock server could not listen");
                        return;
                    }
                };

                let server = builder.serve(make_service_fn(move |_| async move {
                    Ok::<_, Infallible>(service_fn(move |req| serve(req, local_address)))
                }));

                if let Err(e) = server.await {
                    tracing::error!(error = %e, "roads-mock server stopped");
                }
            });
        })?;

    tracing::debug!(address = %local_address, "roads-mock server started");
    *address = Some(local_address);

    Ok(local_address)
}

async fn serve(request: Request<Body>, address: SocketAddr) -> Result<Response<Body>, Infallible> {
    match handle_request(request, address).await {
        Ok(response) => Ok(response),
        Err(err) => {
            registry::registry().record_error(err);
            let mut response = Response::new(Body::empty());
            *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            Ok(response)
        }
    }
}

async fn handle_request(
    mut request: Request<Body>,
    address: SocketAddr,
) -> Result<Response<Body>, Error> {
    let call = read_request_data(&mut request, address).await?;

    let response_data = registry::registry().dispatch(call);

    let mut response_builder = Response::builder().status(response_data.status_code);

    util::put_headers(
        response_builder
            .headers_mut()
            .ok_or(Error::InvalidStatusCode(response_data.status_code))?,
        &response_data.headers,
    )?;

    Ok(response_builder.body(response_data.body.into())?)
}

async fn read_request_data(
    request: &mut Request<Body>,
    address: SocketAddr,
) -> Result<RecordedCall, Error> {
    let method = request.method().to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or("/", |path_and_query| path_and_query.as_str());
    let url = format!("http://{}{}", address, path_and_query);
    let headers = util::extract_headers(request.headers());

    let body = body::to_bytes(request.body_mut())
        .await
        .map_err(|_| Error::InvalidBody)?;

    Ok(RecordedCall {
        method,
        url,
        headers,
        body: String::from_utf8_lossy(&body).into(),
    })
}
