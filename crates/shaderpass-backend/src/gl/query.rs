//! Program interface queries.

use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

/// Number of active resources in `interface`.
pub(super) fn active_resources(program: GLuint, interface: GLenum) -> GLuint {
    let mut count: GLint = 0;
    unsafe {
        gl::GetProgramInterfaceiv(program, interface, gl::ACTIVE_RESOURCES, &mut count);
    }
    count.max(0) as GLuint
}

pub(super) fn resource_name(program: GLuint, interface: GLenum, index: GLuint) -> String {
    let mut max_len: GLint = 0;
    unsafe {
        gl::GetProgramInterfaceiv(program, interface, gl::MAX_NAME_LENGTH, &mut max_len);
    }
    if max_len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; max_len as usize];
    let mut len: GLsizei = 0;
    unsafe {
        gl::GetProgramResourceName(
            program,
            interface,
            index,
            max_len,
            &mut len,
            buf.as_mut_ptr() as *mut GLchar,
        );
    }
    buf.truncate(len.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Query `N` integer properties of one resource.
pub(super) fn resource_props<const N: usize>(
    program: GLuint,
    interface: GLenum,
    index: GLuint,
    props: [GLenum; N],
) -> [GLint; N] {
    let mut values = [0; N];
    unsafe {
        gl::GetProgramResourceiv(
            program,
            interface,
            index,
            N as GLsizei,
            props.as_ptr(),
            N as GLsizei,
            ptr::null_mut(),
            values.as_mut_ptr(),
        );
    }
    values
}

pub(super) fn shader_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }
    read_log(len, |size, written, buf| unsafe {
        gl::GetShaderInfoLog(shader, size, written, buf)
    })
}

pub(super) fn program_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }
    read_log(len, |size, written, buf| unsafe {
        gl::GetProgramInfoLog(program, size, written, buf)
    })
}

fn read_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}
