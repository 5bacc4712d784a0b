mod fonts;
mod freshness;
mod string;
