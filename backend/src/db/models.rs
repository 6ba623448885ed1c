use diesel::prelude::*;
use crate::db::schema::*;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Story {
    pub id: i32,
    pub book_number: i32,
    pub chapter: i32,
    /// First verse of the story, `loader::NO_FIRST_VERSE` for a section without verses
    pub verse: i32,
    /// Section index within the chapter, from 1
    pub order_if_several: i32,
    pub title: String,
}

#[derive(Insertable)]
#[diesel(table_name = stories)]
pub struct NewStory<'a> {
    pub book_number: i32,
    pub chapter: i32,
    pub verse: i32,
    pub order_if_several: i32,
    pub title: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = verses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Verse {
    pub id: i32,
    pub book_number: i32,
    pub chapter: i32,
    pub verse: i32,
    pub text: String,
}

#[derive(Insertable)]
#[diesel(table_name = verses)]
pub struct NewVerse<'a> {
    pub book_number: i32,
    pub chapter: i32,
    pub verse: i32,
    pub text: &'a str,
}
