/*!
# Item Sheet

A small web form for viewing, editing and appending rows of a single CSV file of items.

## Overview

The whole table lives in one CSV file with the columns category, item, unit, price and
notes. Every request reads the entire file; every save rewrites it in full. There is no
database, no caching between requests and no coordination between users: the last
save wins.

## Architecture

### Frontend
- One HTML page with an editable grid (rows can be added and deleted in place), a
  save button and an add-item form
- Outcomes are shown as success, warning or error notices

### Backend
- **Loader** - reads the table, treating a missing file as an empty table and an
  unreadable one as an empty table plus an error notice
- **Saver** - writes header and rows to a temporary file and renames it over the target
- **Session** - the edit and add flows: no-op detection on save, required fields and
  reload-before-append on add

## Modules

- **item**: `ItemRecord`, the `Price` amount type and the form/grid inputs
- **table**: `ItemTable`, column labels and the CSV codec
- **loader**: reading the data file
- **saving**: writing the data file
- **session**: the edit and add flows
- **notice**: user-facing outcome messages
- **errors**: the error type shared by the modules above
- **config**: data path, bind address and label set
- **app**: routing

## REST API Endpoints

- `GET /` - The page
- `GET /api/items` - Current rows, column labels and load notices
- `POST /api/save` - Persist the edited grid if it changed
- `POST /api/add` - Append one item from the add form
*/

pub mod app;
pub mod config;
pub mod errors;
pub mod item;
pub mod loader;
pub mod notice;
pub mod saving;
pub mod session;
pub mod table;

pub use errors::ItemsError;
pub use item::{ItemRecord, NewItem, Price};
pub use notice::{Level, Notice};
pub use session::Session;
pub use table::{ColumnLabels, ItemTable};
