use crate::error::Result;
use crate::soql;
use crate::strategy::{flow_records, object_record, profile_records, user_records};
use crate::term::SearchTerm;
use crate::transport::{QueryApi, QueryTransport, RestTransport};
use orgjump_protocol::{CategoryKind, ResultRecord, RESULT_LIMIT};
use orgjump_session::{CookieStore, SessionResolver};
use serde::Serialize;

/// Records for one lookup plus the origin they should be opened against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOutcome {
    pub origin: String,
    pub records: Vec<ResultRecord>,
}

impl RouteOutcome {
    pub fn top(&self) -> Option<&ResultRecord> {
        self.records.first()
    }
}

/// Dispatches a category lookup to its strategy.
pub struct QueryRouter<T = RestTransport> {
    resolver: SessionResolver,
    transport: T,
    limit: usize,
}

impl<T: QueryTransport> QueryRouter<T> {
    pub fn new(resolver: SessionResolver, transport: T) -> Self {
        Self {
            resolver,
            transport,
            limit: RESULT_LIMIT,
        }
    }

    /// Lowers the result cap. Values outside `1..=RESULT_LIMIT` are clamped.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, RESULT_LIMIT);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn resolver(&self) -> &SessionResolver {
        &self.resolver
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves a fresh session for `tab_url` and runs the `kind` lookup.
    ///
    /// Zero matches is an empty `records` list, not an error.
    pub async fn route(
        &self,
        tab_url: &str,
        cookies: &dyn CookieStore,
        kind: CategoryKind,
        term: &SearchTerm,
    ) -> Result<RouteOutcome> {
        let session = self.resolver.resolve(tab_url, cookies).await?;
        log::debug!("{kind} lookup for '{term}' via {}", session.origin);

        let records = match kind {
            CategoryKind::Flow => {
                let statement = soql::flow_definitions(term, self.limit);
                let rows = self
                    .transport
                    .query(&session, QueryApi::Tooling, &statement)
                    .await?;
                flow_records(rows, self.limit)?
            }
            CategoryKind::User => {
                let statement = soql::users(term, self.limit);
                let rows = self
                    .transport
                    .query(&session, QueryApi::Data, &statement)
                    .await?;
                user_records(rows, self.limit)?
            }
            CategoryKind::Profile => {
                let statement = soql::profiles(term, self.limit);
                let rows = self
                    .transport
                    .query(&session, QueryApi::Data, &statement)
                    .await?;
                profile_records(rows, self.limit)?
            }
            CategoryKind::Object => vec![object_record(term)],
        };

        Ok(RouteOutcome {
            origin: session.origin,
            records,
        })
    }
}
