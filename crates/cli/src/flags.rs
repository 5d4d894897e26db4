use clap::ValueEnum;
use orgjump_protocol::CategoryKind;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum CategoryFlag {
    #[value(alias = "flows")]
    Flow,
    #[value(alias = "users")]
    User,
    #[value(alias = "profiles")]
    Profile,
    #[value(aliases = ["obj", "objects"])]
    Object,
}

impl CategoryFlag {
    pub(crate) const fn as_domain(self) -> CategoryKind {
        match self {
            CategoryFlag::Flow => CategoryKind::Flow,
            CategoryFlag::User => CategoryKind::User,
            CategoryFlag::Profile => CategoryKind::Profile,
            CategoryFlag::Object => CategoryKind::Object,
        }
    }
}
