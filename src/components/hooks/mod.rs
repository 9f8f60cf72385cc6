mod use_mutation;
mod use_query;

pub(crate) use use_mutation::use_mutation;
pub(crate) use use_query::use_query;
